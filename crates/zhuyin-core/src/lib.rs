pub mod dict;
pub mod encode;
pub mod resolver;
pub mod settings;
pub mod style;
pub mod unicode;

pub use dict::{DictEntry, DictError, PolyphonicDictionary, ToneTable};
pub use encode::{encode, strip_markers};
pub use resolver::{ResolvedChar, Resolver};
pub use style::StyleSet;
