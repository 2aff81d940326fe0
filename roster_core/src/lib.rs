// Shared vocabulary for the duty-roster pipeline: the fixed shift catalogue,
// demand slots, weekday handling, and the JSON documents exchanged with the
// outside world.

pub mod input;
pub mod output;
pub mod roster;
pub mod shifts;
pub mod weekday;
