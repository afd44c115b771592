pub mod normalize;
pub mod store;
pub mod transfer;

use uuid::Uuid;

/// Mints opaque identifiers for skill rows. Injected into the store and the
/// normalizer so tests can run with a deterministic sequence.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

impl<F: FnMut() -> String> IdGenerator for F {
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Default generator: random UUID v4.
#[derive(Debug, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}
