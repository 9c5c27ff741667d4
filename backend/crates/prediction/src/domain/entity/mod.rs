//! Entity Module

pub mod league;
pub mod prediction;
pub mod team;
