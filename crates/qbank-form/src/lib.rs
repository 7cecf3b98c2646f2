//! Editable form projection of question records.
//!
//! A [`FormFragment`] is the data half of the editor form: one field per
//! input a front end would render. The mapping is bidirectional and
//! kind-exact — [`FormFragment::from_record`] builds the fragment and
//! [`FormFragment::read_record`] reads the committed values back into a
//! canonical record without ever panicking on malformed in-between states.

mod fragment;

pub use fragment::{FormFragment, OptionSlot, RANK_FALLBACK};
