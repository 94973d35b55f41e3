//! Small shared utilities for text handling and Office Open XML packaging.

pub(crate) mod string;
pub(crate) mod xml;
pub(crate) mod zip;
