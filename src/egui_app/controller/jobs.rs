use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread;

use crate::classifier::{PredictClient, PredictError, Prediction};

pub(crate) enum JobMessage {
    PredictFinished(PredictOutcome),
}

pub(crate) struct PredictOutcome {
    pub(crate) result: Result<Prediction, PredictError>,
}

/// Worker-thread bookkeeping for the controller.
///
/// One request may be in flight at a time; the controller polls the message
/// channel each frame instead of blocking on the response.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    predict_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            predict_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn begin_predict(&mut self, client: PredictClient, features: Vec<f64>) {
        if self.predict_in_progress {
            return;
        }
        self.predict_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = client.predict(&features);
            let _ = tx.send(JobMessage::PredictFinished(PredictOutcome { result }));
        });
    }

    pub(super) fn clear_predict(&mut self) {
        self.predict_in_progress = false;
    }
}
