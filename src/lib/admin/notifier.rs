use log::{error, info};

/// A trait, necessary for every entity that shows the user a blocking message
/// after an action finished.
pub trait Notifier {
    fn acknowledge(&self, message: &str);
    fn alert(&self, message: &str);
}

impl<N: Notifier> Notifier for &N {
    fn acknowledge(&self, message: &str) {
        (**self).acknowledge(message)
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

/// Writes acknowledgments and alerts to the log, which the binaries print to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn acknowledge(&self, message: &str) {
        info!("{}", message);
    }

    fn alert(&self, message: &str) {
        error!("{}", message);
    }
}
