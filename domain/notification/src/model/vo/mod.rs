mod bucket;
mod change;
mod kind;
mod preference;
mod recipient;
mod sticker;

#[rustfmt::skip]
pub use {
    bucket::*,
    change::*,
    kind::*,
    preference::*,
    recipient::*,
    sticker::*,
};
