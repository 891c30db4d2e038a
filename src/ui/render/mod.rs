mod all;
mod collections;
mod entries;
mod footer;
mod header;
mod log;
mod overlay;
mod search;
mod sources;
mod upload;

use self::log::log;
use super::*;
use footer::footer;
use header::header;

pub use all::all as render;
