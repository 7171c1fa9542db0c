// ABOUTME: Event handler trait for host notifications
// ABOUTME: Handlers run synchronously on the host's UI thread, one event at a time

use std::fmt::Debug;

/// Generic event handler trait for view events
pub trait EventHandler<E: Debug> {
    type Error: Debug;

    /// Handle a single event
    fn handle(&mut self, event: E) -> Result<(), Self::Error>;

    /// Handle events in delivery order, stopping at the first failure
    fn handle_batch(&mut self, events: Vec<E>) -> Result<(), Self::Error> {
        for event in events {
            self.handle(event)?;
        }
        Ok(())
    }
}

/// Event handler error types
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("No view registered for {view_id}")]
    UnknownView { view_id: smallbraces_types::ViewId },

    #[error("Handler failed to process event: {message}")]
    ProcessingFailed { message: String },

    #[error("Handler internal error: {source}")]
    Internal {
        source: Box<dyn std::error::Error + 'static>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct TestEvent(&'static str);

    struct TestHandler {
        handled_events: Vec<&'static str>,
    }

    impl EventHandler<TestEvent> for TestHandler {
        type Error = HandlerError;

        fn handle(&mut self, event: TestEvent) -> Result<(), Self::Error> {
            if event.0 == "bad" {
                return Err(HandlerError::ProcessingFailed {
                    message: "bad event".to_string(),
                });
            }
            self.handled_events.push(event.0);
            Ok(())
        }
    }

    #[test]
    fn test_event_handler() {
        let mut handler = TestHandler {
            handled_events: Vec::new(),
        };

        handler.handle(TestEvent("test")).unwrap();

        assert_eq!(handler.handled_events, vec!["test"]);
    }

    #[test]
    fn test_batch_stops_at_failure() {
        let mut handler = TestHandler {
            handled_events: Vec::new(),
        };

        let result = handler.handle_batch(vec![
            TestEvent("event1"),
            TestEvent("bad"),
            TestEvent("event3"),
        ]);

        assert!(result.is_err());
        assert_eq!(handler.handled_events, vec!["event1"]);
    }
}
