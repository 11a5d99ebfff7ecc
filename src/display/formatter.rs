//! Report output, verbatim by default with optional termimad styling

use std::io::{self, Write};

use termimad::MadSkin;

use crate::display::terminal::should_use_colors;

/// Print the finished report
///
/// The text is written exactly as edited unless `pretty` is set and stdout
/// supports colors.
pub fn print_report(report: &str, pretty: bool) {
    if pretty && should_use_colors() {
        if let Err(e) = print_rich(report) {
            tracing::warn!(error = %e, "terminal rendering failed, using plain output");
            print_plain(report);
        }
    } else {
        print_plain(report);
    }
}

/// Print with termimad styling
fn print_rich(markdown: &str) -> Result<(), termimad::Error> {
    let mut skin = MadSkin::default();
    customize_skin(&mut skin);
    skin.write_text_on(&mut io::stdout(), markdown)
}

/// Report headings stand out, commit and message bullets stay quiet
fn customize_skin(skin: &mut MadSkin) {
    use termimad::crossterm::style::{Attribute, Color::*};

    skin.headers[0].set_fg(Green);
    skin.headers[0].add_attr(Attribute::Bold);
    skin.headers[1].set_fg(Cyan);
    skin.headers[1].add_attr(Attribute::Bold);
    skin.headers[2].set_fg(Blue);

    skin.inline_code.set_fg(Yellow);
    skin.bullet.set_fg(DarkGrey);
}

/// Print the text exactly as written, ending with a newline
fn print_plain(markdown: &str) {
    let mut stdout = io::stdout().lock();
    if let Err(e) = write_plain(&mut stdout, markdown) {
        tracing::warn!(error = %e, "could not write report to stdout");
    }
}

fn write_plain<W: Write>(out: &mut W, markdown: &str) -> io::Result<()> {
    out.write_all(markdown.as_bytes())?;
    if !markdown.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}
