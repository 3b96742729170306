use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use critique_logging::{critique_error, critique_info, critique_warn};

use crate::client::{load_document, AnalysisClient, ClientSettings, ReqwestAnalysisClient};
use crate::{AnalysisError, AnalysisRequest, EngineEvent};

enum EngineCommand {
    Analyze {
        document: PathBuf,
        job_description: Option<String>,
    },
}

/// Runs analysis submissions on a background tokio runtime.
///
/// Commands go in over one channel and completion events come back over
/// another, so the shell's event loop never blocks on the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_client(Arc::new(ReqwestAnalysisClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn AnalysisClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    critique_error!("Failed to start engine runtime: {}", err);
                    while cmd_rx.recv().is_ok() {
                        let _ = event_tx.send(EngineEvent::AnalysisCompleted(Err(
                            AnalysisError::Network(format!("engine runtime unavailable: {err}")),
                        )));
                    }
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queues one analysis. The document is read on the engine thread.
    pub fn submit(&self, document: PathBuf, job_description: Option<String>) {
        if self
            .cmd_tx
            .send(EngineCommand::Analyze {
                document,
                job_description,
            })
            .is_err()
        {
            critique_warn!("Engine thread is gone; submission dropped");
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn AnalysisClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Analyze {
            document,
            job_description,
        } => {
            let result = match load_document(&document).await {
                Ok(upload) => {
                    client
                        .analyze(AnalysisRequest {
                            document: Some(upload),
                            job_description,
                        })
                        .await
                }
                Err(err) => Err(err),
            };
            match &result {
                Ok(_) => critique_info!("Analysis of {:?} completed", document),
                Err(err) => critique_warn!("Analysis of {:?} failed: {}", document, err),
            }
            let _ = event_tx.send(EngineEvent::AnalysisCompleted(result));
        }
    }
}
