pub mod decks;
pub mod matchups;
pub mod queue;
pub mod resources;
pub mod variants;
