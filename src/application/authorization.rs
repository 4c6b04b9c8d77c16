//! Authorization gate for the modern backend

use tokio::sync::{oneshot, OnceCell};
use tracing::{debug, warn};

use crate::domain::schedule::Duration;

use super::ports::ModernCenter;

/// Ask for notification permission and wait for the answer.
///
/// Without a modern center there is nothing to ask and the answer is
/// `false`. An unanswered prompt counts as denial once `timeout` elapses.
pub async fn request_authorization<M>(center: Option<&M>, timeout: Duration) -> bool
where
    M: ModernCenter + ?Sized,
{
    let Some(center) = center else {
        return false;
    };

    let (tx, rx) = oneshot::channel();
    center.request_authorization(Box::new(move |granted| {
        let _ = tx.send(granted);
    }));

    match tokio::time::timeout(timeout.as_std(), rx).await {
        Ok(Ok(granted)) => {
            debug!(granted, "notification authorization answered");
            granted
        }
        Ok(Err(_)) => {
            warn!("authorization request was dropped without an answer");
            false
        }
        Err(_) => {
            warn!(timeout = %timeout, "authorization request timed out");
            false
        }
    }
}

/// Requests authorization lazily, once per gate
#[derive(Debug)]
pub struct AuthorizationGate {
    timeout: Duration,
    decision: OnceCell<bool>,
}

impl AuthorizationGate {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            decision: OnceCell::new(),
        }
    }

    /// The remembered decision, if authorization was already requested
    pub fn decision(&self) -> Option<bool> {
        self.decision.get().copied()
    }

    /// Request authorization on first use and remember the answer
    pub async fn ensure<M>(&self, center: &M) -> bool
    where
        M: ModernCenter + ?Sized,
    {
        *self
            .decision
            .get_or_init(|| request_authorization(Some(center), self.timeout))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AuthorizationReply, CompletionHandler, ModernRequest};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum Answer {
        Immediately(bool),
        FromThread(bool),
        Never,
    }

    struct MockCenter {
        answer: Answer,
        asked: AtomicUsize,
        parked: Mutex<Vec<AuthorizationReply>>,
    }

    impl MockCenter {
        fn new(answer: Answer) -> Self {
            Self {
                answer,
                asked: AtomicUsize::new(0),
                parked: Mutex::new(Vec::new()),
            }
        }
    }

    impl ModernCenter for MockCenter {
        fn request_authorization(&self, reply: AuthorizationReply) {
            self.asked.fetch_add(1, Ordering::SeqCst);
            match self.answer {
                Answer::Immediately(granted) => reply(granted),
                Answer::FromThread(granted) => {
                    std::thread::spawn(move || reply(granted));
                }
                Answer::Never => self.parked.lock().unwrap().push(reply),
            }
        }

        fn add(&self, _request: ModernRequest, completion: CompletionHandler) {
            completion(None);
        }
    }

    #[tokio::test]
    async fn without_modern_center_is_denied() {
        let granted = request_authorization::<MockCenter>(None, Duration::from_secs(1)).await;
        assert!(!granted);
    }

    #[tokio::test]
    async fn answer_is_returned() {
        let center = MockCenter::new(Answer::Immediately(true));
        assert!(request_authorization(Some(&center), Duration::from_secs(1)).await);

        let center = MockCenter::new(Answer::FromThread(false));
        assert!(!request_authorization(Some(&center), Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn answer_from_platform_thread_is_received() {
        let center = MockCenter::new(Answer::FromThread(true));
        assert!(request_authorization(Some(&center), Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn unanswered_prompt_times_out_as_denied() {
        let center = MockCenter::new(Answer::Never);
        let granted = request_authorization(Some(&center), Duration::from_millis(50)).await;
        assert!(!granted);
    }

    #[tokio::test]
    async fn gate_asks_only_once() {
        let center = MockCenter::new(Answer::Immediately(true));
        let gate = AuthorizationGate::new(Duration::from_secs(1));
        assert_eq!(gate.decision(), None);

        assert!(gate.ensure(&center).await);
        assert!(gate.ensure(&center).await);
        assert_eq!(center.asked.load(Ordering::SeqCst), 1);
        assert_eq!(gate.decision(), Some(true));
    }
}
