use anyhow::{Result, bail};
use std::io::{BufRead, Write};

pub(crate) fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }

    let visible = key.char_indices().nth(8).map_or(key.len(), |(idx, _)| idx);
    format!("{}***", &key[..visible])
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("Input ended before the form was complete");
    }
    Ok(line.trim().to_string())
}

/// Free text; an empty answer falls back to `default` when there is one.
pub(crate) fn prompt_text<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: Option<&str>,
) -> Result<String> {
    let prompt = match default {
        Some(default) => format!("{label} (default: {default}): "),
        None => format!("{label}: "),
    };
    let answer = read_answer(input, output, &prompt)?;

    match default {
        Some(default) if answer.is_empty() => Ok(default.to_string()),
        _ => Ok(answer),
    }
}

/// Re-asks until the answer parses and passes `accept`.
pub(crate) fn prompt_parsed<R, W, T>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: Option<T>,
    accept: impl Fn(&T) -> Result<(), String>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
    T: std::str::FromStr + std::fmt::Display + Clone,
{
    let prompt = match &default {
        Some(default) => format!("{label} (default: {default}): "),
        None => format!("{label}: "),
    };

    loop {
        let answer = read_answer(input, output, &prompt)?;
        let parsed = if answer.is_empty() {
            match &default {
                Some(default) => default.clone(),
                None => {
                    writeln!(output, "❌ A value is required.")?;
                    continue;
                }
            }
        } else {
            match answer.parse::<T>() {
                Ok(value) => value,
                Err(_) => {
                    writeln!(output, "❌ Please enter a valid value.")?;
                    continue;
                }
            }
        };

        match accept(&parsed) {
            Ok(()) => return Ok(parsed),
            Err(reason) => writeln!(output, "❌ {reason}")?,
        }
    }
}

/// Numbered menu; returns the index of the chosen option.
pub(crate) fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    options: &[String],
    current: Option<usize>,
) -> Result<usize> {
    writeln!(output, "{label}:")?;
    for (idx, option) in options.iter().enumerate() {
        let marker = if Some(idx) == current { " (current)" } else { "" };
        writeln!(output, "  {}. {option}{marker}", idx + 1)?;
    }

    let prompt = match current {
        Some(idx) => format!("Select 1-{} (default: {}): ", options.len(), idx + 1),
        None => format!("Select 1-{}: ", options.len()),
    };

    loop {
        let answer = read_answer(input, output, &prompt)?;
        if answer.is_empty() {
            if let Some(idx) = current {
                return Ok(idx);
            }
        }
        match answer.parse::<usize>() {
            Ok(num) if num >= 1 && num <= options.len() => return Ok(num - 1),
            _ => writeln!(
                output,
                "❌ Please enter a number between 1 and {}.",
                options.len()
            )?,
        }
    }
}
