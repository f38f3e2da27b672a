//! Entry Demo - The full verification screen
//!
//! Run with: cargo run --example entry
//!
//! Optional arguments: the target code and a theme name.
//!
//! ```text
//! cargo run --example entry -- 4207 terminal
//! ```

use std::cell::Cell;
use std::rc::Rc;

use pinpad_tui::{CodeEntryController, VerificationScreen, set_theme, theme};

fn main() -> std::io::Result<()> {
    let mut args = std::env::args().skip(1);
    let code: u32 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1234);
    if let Some(name) = args.next() {
        if !set_theme(&name) {
            eprintln!(
                "unknown theme {:?}, available: {}",
                name,
                theme::preset_names().join(", ")
            );
            std::process::exit(1);
        }
    }

    let correct = Rc::new(Cell::new(0u32));
    let wrong = Rc::new(Cell::new(0u32));

    let controller = CodeEntryController::new(code)
        .on_correct({
            let correct = correct.clone();
            move || correct.set(correct.get() + 1)
        })
        .on_wrong({
            let wrong = wrong.clone();
            move || wrong.set(wrong.get() + 1)
        });

    VerificationScreen::new(controller).run()?;

    println!(
        "solved {} time(s), missed {} time(s) - the code was {}",
        correct.get(),
        wrong.get(),
        code
    );
    Ok(())
}
