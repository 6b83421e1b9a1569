use jiff::SpanRelativeTo;
use roadpath_routing::{point::Point, types::NodeId};

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(millis) = input.parse::<i64>() {
        return Ok(jiff::SignedDuration::from_millis(millis.abs()));
    }

    Err(String::from("Invalid duration"))
}

/// One line typed in interactive mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractiveCommand {
    Pick(NodeId),
    Click(Point),
    Reset,
    Show,
    Quit,
}

pub fn parse_command(line: &str) -> Result<InteractiveCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Err(String::from("Empty command"));
    };

    let command = match command.to_ascii_lowercase().as_str() {
        "pick" | "p" => InteractiveCommand::Pick(NodeId::new(parse_value(parts.next(), "id")?)),
        "click" | "c" => InteractiveCommand::Click(Point::new(
            parse_value(parts.next(), "x")?,
            parse_value(parts.next(), "y")?,
        )),
        "reset" | "r" => InteractiveCommand::Reset,
        "show" | "s" => InteractiveCommand::Show,
        "quit" | "exit" | "q" => InteractiveCommand::Quit,
        other => return Err(format!("Unknown command `{other}`")),
    };

    if let Some(extra) = parts.next() {
        return Err(format!("Unexpected argument `{extra}`"));
    }

    Ok(command)
}

fn parse_value<T: std::str::FromStr>(value: Option<&str>, name: &str) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing {name}"))?;
    value
        .parse()
        .map_err(|_| format!("Invalid {name} `{value}`"))
}
