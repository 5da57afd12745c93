use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use keyspace::{ProgressSample, ProgressSink};

/// Renders pipeline progress as a terminal progress bar on stderr.
pub struct ProgressBarSink {
    bar: ProgressBar,
}

impl ProgressBarSink {
    pub fn new(total: u64, visible: bool) -> Self {
        if !visible {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
        );
        bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(12));
        Self { bar }
    }
}

impl ProgressSink for ProgressBarSink {
    fn observe(&mut self, sample: ProgressSample) {
        self.bar.set_position(sample.completed);
        self.bar.set_message(format!("{:.0}/s", sample.rate));
    }

    fn finish(&mut self, sample: ProgressSample) {
        self.observe(sample);
        self.bar.abandon();
    }
}
