pub mod vector;
pub mod states;
pub mod params;
pub mod forces;
pub mod integrator;
pub mod energy;
pub mod trajectory;
pub mod engine;
pub mod scenario;
pub mod producer;
