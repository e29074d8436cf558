//! An ordered set backed by an arena-allocated red black tree, and a loader that builds a word
//! dictionary on top of it.
//!
//! # Examples
//!
//! ```
//! use rb_dictionary::red_black_tree::RedBlackSet;
//!
//! let set: RedBlackSet<u32> = vec![10, 20, 30].into_iter().collect();
//! assert_eq!(set.height(), 1);
//! assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&10, &20, &30]);
//! ```

pub mod arena;
pub mod dictionary;
pub mod red_black_tree;
