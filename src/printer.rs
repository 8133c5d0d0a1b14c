use crate::http::Outcome;
use crate::optional::Optional;
use crate::problem_details::ProblemDetails;
use anstyle::{AnsiColor, Style};
use serde_json::Value;
use std::io::{self, Write};

fn pretty_print_json_colored(value: &Value) -> String {
    use colored_json::{Color, ColoredFormatter, PrettyFormatter, Styler};
    let styler = Styler {
        key: Color::Yellow.bold(),
        ..Default::default()
    };
    let formatter = ColoredFormatter::with_styler(PrettyFormatter::new(), styler);
    formatter
        .to_colored_json_auto(value)
        .unwrap_or_else(|_| serde_json::to_string_pretty(value).unwrap_or_default())
}

fn get_status_style(status: u16) -> Style {
    let color = match status {
        200..=299 => AnsiColor::Green,
        300..=399 => AnsiColor::Yellow,
        400..=599 => AnsiColor::Red,
        _ => AnsiColor::White,
    };
    Style::new().fg_color(Some(anstyle::Color::Ansi(color))).bold()
}

fn format_status_line(status: u16, title: &str) -> String {
    let status_style = get_status_style(status);
    format!(
        "{}Status: {} {}{}\n",
        status_style.render(),
        status,
        title,
        anstyle::Reset.render()
    )
}

fn format_field(name: &str, value: &str) -> String {
    let key_style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Blue)));
    let value_style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::White)));
    format!(
        "{}{}: {}{}{}\n",
        key_style.render(),
        name,
        value_style.render(),
        value,
        anstyle::Reset.render()
    )
}

/// Render a problem, skipping empty optional fields
pub fn format_problem(problem: &ProblemDetails) -> String {
    let mut output = format_status_line(problem.status, &problem.title);
    output.push_str(&format_field("type", &problem.problem_type));
    for (name, value) in [("detail", &problem.detail), ("instance", &problem.instance)] {
        if !value.is_empty() {
            output.push_str(&format_field(name, value));
        }
    }
    for error in &problem.errors {
        output.push_str(&format_field("error", error));
    }
    for (name, value) in &problem.extensions {
        match value {
            Value::String(text) => output.push_str(&format_field(name, text)),
            other => output.push_str(&format_field(name, &other.to_string())),
        }
    }
    output
}

fn format_payload(payload: &Optional<Value>) -> String {
    payload.as_ref().match_with(
        |value| match value {
            Value::String(text) => format!("{text}\n"),
            other => format!("{}\n", pretty_print_json_colored(other)),
        },
        || {
            let style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)));
            format!("{}(no content){}\n", style.render(), anstyle::Reset.render())
        },
    )
}

pub fn format_outcome(outcome: &Outcome<Value>) -> String {
    outcome.as_ref().fold(format_problem, format_payload)
}

pub fn print_outcome(outcome: &Outcome<Value>) -> io::Result<()> {
    print_outcome_to(&mut io::stdout().lock(), outcome)
}

fn print_outcome_to<W: Write>(writer: &mut W, outcome: &Outcome<Value>) -> io::Result<()> {
    write!(writer, "{}", format_outcome(outcome))?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::either::Either;
    use serde_json::json;

    fn red() -> String {
        Style::new()
            .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)))
            .bold()
            .render()
            .to_string()
    }

    #[test]
    fn test_format_problem_fields() {
        let mut problem = ProblemDetails {
            problem_type: "https://example.com/probs/out-of-credit".to_string(),
            title: "You do not have enough credit.".to_string(),
            status: 403,
            detail: String::new(),
            instance: "/account/12345".to_string(),
            errors: vec!["error1".to_string()],
            ..Default::default()
        };
        problem.extensions.insert("traceId".to_string(), json!("00-abc-01"));
        let output = format_outcome(&Either::Left(problem));
        assert!(output.contains("Status: 403 You do not have enough credit."));
        assert!(output.contains(&red()));
        assert!(output.contains("https://example.com/probs/out-of-credit"));
        assert!(output.contains("/account/12345"));
        assert!(output.contains("error1"));
        assert!(output.contains("traceId: "));
        assert!(output.contains("00-abc-01"));
        assert!(!output.contains("detail: "));
    }

    #[test]
    fn test_format_json_payload() {
        let outcome: Outcome<Value> = Either::Right(Optional::Some(json!({"foo": 1, "bar": {"baz": 2}})));
        let output = format_outcome(&outcome);
        assert!(output.contains("foo"));
        assert!(output.contains("baz"));
        assert!(output.contains('{'));
    }

    #[test]
    fn test_format_text_payload_unquoted() {
        let outcome: Outcome<Value> = Either::Right(Optional::Some(json!("hello")));
        assert_eq!(format_outcome(&outcome), "hello\n");
    }

    #[test]
    fn test_format_no_content() {
        let outcome: Outcome<Value> = Either::Right(Optional::None);
        assert!(format_outcome(&outcome).contains("(no content)"));
    }

    #[test]
    fn test_print_outcome_to_writer_trailing_newline() {
        let outcome: Outcome<Value> = Either::Left(ProblemDetails::default());
        let mut buf = Vec::new();
        print_outcome_to(&mut buf, &outcome).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.ends_with('\n'));
        assert!(output.contains("Status: 500 An unknown error occurred"));
    }
}
