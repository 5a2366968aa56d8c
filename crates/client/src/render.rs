use std::fmt::Write;

use crate::view::BlogView;

const RULE_WIDTH: usize = 54;

/// Draw the whole screen for `view`: the post form, then every loaded post
/// with its actions.
pub fn render(view: &BlogView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_screen(&mut out, view);
    out
}

fn write_screen(out: &mut String, view: &BlogView) -> std::fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{:^width$}", "My Blog", width = RULE_WIDTH)?;
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    let (heading, button) = if view.is_editing() {
        ("Update Post", "Update")
    } else {
        ("Create a New Post", "Submit")
    };
    writeln!(out, "{heading}")?;
    writeln!(out, "  Title:   {}", view.draft_title)?;
    writeln!(out, "  Content: {}", view.draft_content)?;
    writeln!(out, "  [{button}]")?;
    writeln!(out)?;

    if view.posts().is_empty() {
        writeln!(out, "No posts yet.")?;
    }
    for post in view.posts() {
        writeln!(out, "{post}")?;
        writeln!(out, "  [Update: edit {id}]  [Delete: delete {id}]", id = post.id())?;
        writeln!(out)?;
    }

    writeln!(out, "{:-<width$}", "", width = RULE_WIDTH)?;
    writeln!(out, "© 2025 My Blog")
}
