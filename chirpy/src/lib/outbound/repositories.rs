pub mod chirp;
pub mod user;

pub use chirp::PostgresChirpRepository;
pub use user::PostgresUserRepository;
