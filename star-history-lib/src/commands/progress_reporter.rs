use crate::stargazers::Progress;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Instant;

/// Refresh rate for the spinner (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const DETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {pos}/{len} {msg}";
const DETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {pos}/{len} {msg}";
const INDETERMINATE_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{spinner}] {elapsed}";
const INDETERMINATE_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{spinner}] {elapsed}";

/// A progress bar that stays hidden until a delay has passed.
///
/// Short runs finish without drawing anything, and a very long delay effectively
/// disables the bar when diagnostic logging is writing to the same terminal.
#[derive(Debug)]
pub struct ProgressReporter {
    bar: ProgressBar,
    visible_after: Instant,
    visible: AtomicBool,
    determinate: AtomicBool,
    use_colors: bool,
    page_lines: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// When `use_colors` is false, progress bar chrome is rendered without ANSI styling.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_draw_target(ProgressDrawTarget::hidden());

        Self {
            bar,
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
            determinate: AtomicBool::new(false),
            use_colors,
            page_lines: false,
        }
    }

    /// Also print every reported position as a plain line on stderr.
    ///
    /// Used when stderr is not a terminal, where the bar is never drawn.
    #[must_use]
    pub const fn with_page_lines(mut self, enabled: bool) -> Self {
        self.page_lines = enabled;
        self
    }

    fn reveal_if_due(&self) {
        if !self.visible.load(Ordering::Relaxed) && Instant::now() >= self.visible_after {
            self.visible.store(true, Ordering::Relaxed);
            self.bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }
    }

    fn spinner_style(&self) -> ProgressStyle {
        let template = if self.use_colors { INDETERMINATE_TEMPLATE } else { INDETERMINATE_TEMPLATE_NO_COLOR };
        ProgressStyle::default_spinner()
            .template(template)
            .expect("could not create progress bar style")
            .tick_strings(&[
                ">                        ",
                "=>                       ",
                "==>                      ",
                "===>                     ",
                " ===>                    ",
                "  ===>                   ",
                "   ===>                  ",
                "    ===>                 ",
                "     ===>                ",
                "      ===>               ",
                "       ===>              ",
                "        ===>             ",
                "         ===>            ",
                "          ===>           ",
                "           ===>          ",
                "            ===>         ",
                "             ===>        ",
                "              ===>       ",
                "               ===>      ",
                "                ===>     ",
                "                 ===>    ",
                "                  ===>   ",
                "                   ===>  ",
                "                    ===> ",
                "                     ===>",
                "                      ===",
                "                       ==",
                "                        =",
                "                         ",
            ])
    }

    fn bar_style(&self) -> ProgressStyle {
        let template = if self.use_colors { DETERMINATE_TEMPLATE } else { DETERMINATE_TEMPLATE_NO_COLOR };
        ProgressStyle::default_bar()
            .template(template)
            .expect("could not create progress bar style")
            .progress_chars("=> ")
    }
}

fn page_line(current: u64, total: u64, message: &str) -> String {
    if message.is_empty() {
        format!("{current} / {total}")
    } else {
        format!("{current} / {total}: {message}")
    }
}

impl Progress for ProgressReporter {
    /// Start a new phase, shown as a spinner until the first position is reported.
    fn set_phase(&self, phase: &str) {
        self.reveal_if_due();
        self.determinate.store(false, Ordering::Relaxed);
        self.bar.set_prefix(phase.to_string());
        self.bar.set_message("");
        self.bar.set_style(self.spinner_style());
        self.bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));
    }

    fn set_position(&self, current: u64, total: u64, message: &str) {
        self.reveal_if_due();
        if !self.determinate.swap(true, Ordering::Relaxed) {
            self.bar.disable_steady_tick();
            self.bar.set_style(self.bar_style());
        }

        self.bar.set_length(total);
        self.bar.set_position(current);
        self.bar.set_message(message.to_string());

        if self.page_lines {
            eprintln!("{}", page_line(current, total, message));
        }
    }

    /// Print a message line without disrupting the progress indicator.
    fn println(&self, msg: &str) {
        self.bar.suspend(|| eprintln!("{msg}"));
    }

    /// Finish and clear the progress indicator.
    fn done(&self) {
        self.bar.disable_steady_tick();
        if self.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}
