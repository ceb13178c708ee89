//! Proof-of-work policy and chain validation for landchain.
//!
//! This crate provides:
//! - Difficulty handling and block sealing (`ProofOfWork`)
//! - Chain integrity checks: digest consistency and back-links (`ChainValidator`)
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use landchain_consensus::{ChainValidator, ProofOfWork};
//! use landchain_core::Block;
//!
//! let pow = ProofOfWork::new(2).unwrap();
//! let genesis = Block::genesis(Utc::now()).unwrap();
//!
//! let mut next = Block::new(1, vec![], Utc::now(), genesis.digest.clone()).unwrap();
//! pow.seal(&mut next).unwrap();
//!
//! assert!(ChainValidator::is_valid(&[genesis, next]));
//! ```

pub mod pow;
pub mod validator;

// Re-export commonly used types
pub use pow::{ConsensusError, ProofOfWork, PRACTICAL_DIFFICULTY_LIMIT};
pub use validator::{ChainValidator, ValidationError};
