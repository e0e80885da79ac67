pub mod auth;
pub mod siswa;
