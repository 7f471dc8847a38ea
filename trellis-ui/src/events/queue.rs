use super::UiEvent;
use std::collections::VecDeque;

/// Interaction events waiting for
/// [`Renderer::process_events`](crate::Renderer::process_events), oldest first
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<UiEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: UiEvent) {
        self.pending.push_back(event);
    }

    /// Take the oldest pending event
    pub fn pop(&mut self) -> Option<UiEvent> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<UiEvent> for EventQueue {
    fn extend<I: IntoIterator<Item = UiEvent>>(&mut self, events: I) {
        self.pending.extend(events);
    }
}

impl FromIterator<UiEvent> for EventQueue {
    fn from_iter<I: IntoIterator<Item = UiEvent>>(events: I) -> Self {
        Self {
            pending: events.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::ui::ElementId;

    #[test]
    fn test_oldest_event_comes_out_first() {
        let mut queue = EventQueue::new();
        queue.push(UiEvent::input(ElementId(4), "a"));
        queue.push(UiEvent::blur(ElementId(4)));
        queue.push(UiEvent::submit(ElementId(1)));
        assert_eq!(queue.len(), 3);

        let kinds: Vec<_> = std::iter::from_fn(|| queue.pop()).map(|e| e.kind).collect();
        assert_eq!(kinds, [EventKind::Input, EventKind::Blur, EventKind::Submit]);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_collect_then_extend() {
        let mut queue: EventQueue = [UiEvent::click(ElementId(2))].into_iter().collect();
        queue.extend([UiEvent::toggle(ElementId(3), true)]);

        assert_eq!(queue.pop().map(|e| e.target()), Some(ElementId(2)));
        let toggle = queue.pop().unwrap();
        assert_eq!(toggle.checked, Some(true));
        assert!(queue.is_empty());
    }
}
