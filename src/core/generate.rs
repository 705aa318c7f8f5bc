//! `generate` subcommand: run the docstring command against a file.

use std::fs;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{
    cli::{AppContext, GenerateArgs},
    core::{
        command::{DocCommand, DocError, Outcome, Plan},
        signature::ParsedSignature,
    },
    infra::{
        buffer::TextBuffer,
        config::{Config, load_config},
        fields::{Field, expand_fields},
    },
};

/// JSON shape of `generate --json`.
#[derive(Debug, Serialize)]
struct Report<'a>
{
    file: String,
    language: &'a str,
    #[serde(flatten)]
    signature: &'a ParsedSignature,
    lines_read: usize,
    balanced: bool,
    snippet: &'a str,
    text: String,
    fields: Vec<Field>,
}

#[instrument(skip(ctx), fields(file = %args.file.display()))]
pub fn run(
    args: GenerateArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config().unwrap_or_else(|err| {
        warn!("{err:#}; using defaults");
        Config::default()
    });

    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut buffer = TextBuffer::for_path(&args.file, &content);
    if let Some(lang) = &args.lang
    {
        buffer.set_scope(format!("source.{lang}"));
    }
    buffer.set_cursor_line_col(args.line, args.column)?;

    let command = DocCommand::new(config);

    if args.write
    {
        return write_in_place(&command, buffer, &content, &args, ctx);
    }

    match command.plan(&buffer)
    {
        Ok(plan) => print_plan(&plan, &args),
        Err(err) =>
        {
            report_skip(&err, ctx);
            Ok(())
        }
    }
}

fn print_plan(
    plan: &Plan,
    args: &GenerateArgs,
) -> Result<()>
{
    if args.json
    {
        let expanded = expand_fields(&plan.snippet);
        let report = Report {
            file: args
                .file
                .display()
                .to_string(),
            language: plan.language,
            signature: &plan.signature,
            lines_read: plan
                .statement
                .lines_read,
            balanced: plan
                .statement
                .is_balanced(),
            snippet: &plan.snippet,
            text: expanded.text,
            fields: expanded.fields,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    }
    else if args.raw
    {
        println!("{}", plan.snippet);
    }
    else
    {
        println!(
            "{}",
            expand_fields(&plan.snippet).text
        );
    }
    Ok(())
}

fn write_in_place(
    command: &DocCommand,
    mut buffer: TextBuffer,
    original: &str,
    args: &GenerateArgs,
    ctx: &AppContext,
) -> Result<()>
{
    match command.run(&mut buffer)
    {
        Outcome::Inserted(plan) =>
        {
            if ctx.dry_run
            {
                print!("{}", buffer.text());
                return Ok(());
            }

            fs::write(&args.file, buffer.text())
                .with_context(|| format!("Failed to write {}", args.file.display()))?;

            if !ctx.quiet
            {
                println!(
                    "✓ Documented `{}` ({} parameters) in {}",
                    plan.signature
                        .name,
                    plan.lines
                        .len()
                        - 1,
                    args.file
                        .display()
                );
            }
            Ok(())
        }
        // Trailing text after the cursor is gone even though nothing was
        // inserted.
        Outcome::Skipped(err) =>
        {
            report_skip(&err, ctx);
            if buffer.text() == original
            {
                return Ok(());
            }
            if ctx.dry_run
            {
                print!("{}", buffer.text());
                return Ok(());
            }
            fs::write(&args.file, buffer.text())
                .with_context(|| format!("Failed to write {}", args.file.display()))
        }
    }
}

fn report_skip(
    err: &DocError,
    ctx: &AppContext,
)
{
    if ctx.quiet
    {
        return;
    }
    if ctx.no_color
    {
        eprintln!("note: nothing generated: {err}");
    }
    else
    {
        eprintln!("{} nothing generated: {err}", "note:".yellow());
    }
}
