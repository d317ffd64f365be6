use tokio::sync::watch;

/// Process-wide stop request, raised by Ctrl-C or SIGTERM.
#[derive(Clone)]
pub struct StopSignal {
    sender: watch::Sender<bool>,
}

#[derive(Clone)]
pub struct StopListener {
    receiver: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    pub fn listen(&self) -> StopListener {
        StopListener {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn request_stop(&self, reason: &str) {
        if !*self.sender.borrow() {
            tracing::info!(target: "app", reason, "stop requested");
        }
        self.sender.send_replace(true);
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl StopListener {
    pub async fn stopped(&mut self) {
        if *self.receiver.borrow() {
            return;
        }
        if self.receiver.changed().await.is_err() {
            // sender gone; nothing can request a stop anymore
            std::future::pending::<()>().await;
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.receiver.borrow()
    }
}

pub fn install_signal_handlers(stop: StopSignal) {
    let ctrlc = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrlc.request_stop("ctrl-c");
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        tokio::spawn(async move {
            if let Ok(mut sig) = signal(SignalKind::terminate()) {
                sig.recv().await;
                stop.request_stop("sigterm");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listeners_observe_stop_requests() {
        let stop = StopSignal::new();
        let mut listener = stop.listen();
        assert!(!listener.is_stopped());

        stop.request_stop("test");
        listener.stopped().await;
        assert!(listener.is_stopped());
        assert!(stop.listen().is_stopped());
    }
}
