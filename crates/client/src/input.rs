/// One line typed at the client prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Title(String),
    Content(String),
    Submit,
    Edit(u64),
    Delete(u64),
    Cancel,
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  title <text>    set the draft title
  content <text>  set the draft content
  submit          create the post, or update the one being edited
  edit <id>       load a post into the form to update it
  delete <id>     delete a post
  cancel          stop editing and clear the form
  refresh         draw the screen again
  help            show this help
  quit            leave";

/// Parse a prompt line. Text after `title`/`content` is kept verbatim,
/// apart from surrounding whitespace.
pub fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((line, ""));

    let id = |rest: &str| {
        rest.parse::<u64>()
            .map_err(|_| format!("'{word}' needs a post id, got '{rest}'"))
    };

    match word {
        "title" => Ok(Input::Title(rest.to_string())),
        "content" => Ok(Input::Content(rest.to_string())),
        "submit" => Ok(Input::Submit),
        "edit" | "update" => id(rest).map(Input::Edit),
        "delete" => id(rest).map(Input::Delete),
        "cancel" => Ok(Input::Cancel),
        "refresh" | "" => Ok(Input::Refresh),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(format!("Unknown command '{other}'")),
    }
}
