pub mod decode;
pub mod sprite_sheet;
pub mod tile;
