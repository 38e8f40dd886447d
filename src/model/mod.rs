pub mod location;
pub mod seismic;
pub mod session;
