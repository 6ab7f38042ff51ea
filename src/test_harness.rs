//! Scripted repository for driving the state machines from tests.
//!
//! Every `search`/`next_page` call is recorded and its sender kept, so a test decides exactly
//! when and what each stream emits.

use crate::model::{Resource, Vaccination};
use crate::repository::{ResourceSender, ResourceStream, VaccinationRepository};
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct ScriptedRepository {
    search_calls: Mutex<Vec<String>>,
    next_page_calls: Mutex<Vec<String>>,
    search_senders: Mutex<Vec<ResourceSender<Vec<Vaccination>>>>,
    next_page_senders: Mutex<Vec<ResourceSender<bool>>>,
}

impl ScriptedRepository {
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().clone()
    }

    pub fn next_page_calls(&self) -> Vec<String> {
        self.next_page_calls.lock().clone()
    }

    /// Emit on the most recent next-page stream. Returns `false` if it was released.
    pub fn emit_next_page(&self, resource: Resource<bool>) -> bool {
        self.next_page_senders
            .lock()
            .last()
            .is_some_and(|sender| sender.emit(resource))
    }

    pub fn emit_next_page_absent(&self) -> bool {
        self.next_page_senders
            .lock()
            .last()
            .is_some_and(|sender| sender.emit_absent())
    }

    /// Emit on the most recent search stream. Returns `false` if it was released.
    pub fn emit_search(&self, resource: Resource<Vec<Vaccination>>) -> bool {
        self.search_senders
            .lock()
            .last()
            .is_some_and(|sender| sender.emit(resource))
    }

    /// Drop every next-page sender, closing those streams.
    pub fn close_next_pages(&self) {
        self.next_page_senders.lock().clear();
    }
}

impl VaccinationRepository for ScriptedRepository {
    fn search(&self, query: &str) -> ResourceStream<Vec<Vaccination>> {
        let (sender, stream) = ResourceStream::channel();
        self.search_calls.lock().push(query.to_string());
        self.search_senders.lock().push(sender);
        stream
    }

    fn next_page(&self, query: &str) -> ResourceStream<bool> {
        let (sender, stream) = ResourceStream::channel();
        self.next_page_calls.lock().push(query.to_string());
        self.next_page_senders.lock().push(sender);
        stream
    }
}

pub fn vaccination(id: u64, name: &str) -> Vaccination {
    Vaccination {
        id,
        name: name.to_string(),
        manufacturer: "Test Labs".to_string(),
        description: None,
        doses: None,
    }
}
