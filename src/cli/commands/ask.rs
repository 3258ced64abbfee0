//! Ask Command
//!
//! Answer HR questions about the current selection, once or interactively.

use std::io::{BufRead, Write};

use crate::analytics::DataSet;
use crate::assistant;
use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, FilterArgs};
use crate::types::Result;

const EXAMPLES: [&str; 3] = [
    "What is the average salary in Sales?",
    "Which department has highest attrition?",
    "Who are the top performers in R&D?",
];

pub fn run(question: Option<String>, args: &FilterArgs) -> Result<()> {
    let ctx = CommandContext::load()?;
    let (filter, ds) = ctx.select(args)?;
    let out = Output::new();

    match question {
        Some(q) => {
            let (_, text) = assistant::answer(&q, &ds);
            out.answer(&text);
        }
        None => {
            out.header(&format!("HR Assistant: {}", filter.describe()));
            println!("Ask questions like:");
            for example in EXAMPLES {
                println!("  - {}", example);
            }
            println!("Type 'exit' to quit.");

            let stdin = std::io::stdin();
            let answered = chat_loop(stdin.lock(), std::io::stdout(), &ds)?;
            tracing::debug!("Chat session ended after {} questions", answered);
        }
    }
    Ok(())
}

/// Read questions line by line until `exit`, `quit` or end of input,
/// writing one answer per question. Returns the number answered.
pub fn chat_loop<R: BufRead, W: Write>(input: R, mut output: W, ds: &DataSet) -> Result<usize> {
    let mut answered = 0;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let question = line.trim();

        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }
        if !question.is_empty() {
            let (_, text) = assistant::answer(question, ds);
            writeln!(output, "{}", text)?;
            answered += 1;
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    Ok(answered)
}
