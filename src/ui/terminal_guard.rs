use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear as TermClear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type DemoTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Leaves raw mode and the alternate screen when dropped.
///
/// A panic hook performs the same restore first, so the panic message is
/// printed to a usable terminal. Whichever runs first wins.
pub struct TerminalGuard {
    active: Arc<AtomicBool>,
}

impl TerminalGuard {
    fn install() -> Self {
        let active = Arc::new(AtomicBool::new(true));

        let hook_flag = Arc::clone(&active);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_once(&hook_flag);
            default_hook(info);
        }));

        Self { active }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_once(&self.active);
    }
}

fn restore_once(active: &AtomicBool) {
    if !active.swap(false, Ordering::SeqCst) {
        return;
    }
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

/// Switch the terminal into full-screen mode for the demo.
pub fn setup_terminal() -> io::Result<(DemoTerminal, TerminalGuard)> {
    enable_raw_mode()?;
    // From here on the guard undoes raw mode even if a later step fails.
    let guard = TerminalGuard::install();

    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(TermClear(ClearType::All))?;
    stdout.execute(Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}
