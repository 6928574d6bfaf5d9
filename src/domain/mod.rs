//! Entity resolution for bank names and branch locations.
//!
//! This module holds the static alias tables and the canonicalization
//! logic built on them. Tables are immutable and initialized once.

pub mod alias;
pub mod bank;
pub mod location;

pub use alias::{AliasDictionary, AliasEntry};
pub use bank::{
    bank_meta, canonicalize_bank_name, canonicalize_bank_name_with, recognize_bank,
    BankMeta, BankNameCanonicalizer, BranchInfo, BranchKind, BANKS, BANK_ALIASES,
};
pub use location::{
    canonicalize_branch_location, location_meta, LocationCanonicalizer, LocationEntry,
    LocationMeta, LocationMode,
};
