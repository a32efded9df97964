// Core value types.
//
// Everything here is pure: no I/O, no global state, no interior mutability.
// Values are immutable and safe to share across threads.

pub mod asset;
