#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use am_mapper as mapper;
pub use am_reflect as reflect;
pub use am_utils as utils;
