pub mod seaorm;

pub use seaorm::SeaOrmItemStore;
