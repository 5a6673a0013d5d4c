use std::borrow::Cow;

use super::WritableChunk;

pub const HEADER: &[u8; 4] = b"IDAT";

/// Holds a slice of the zlib stream; a stream may be split over several.
#[derive(Debug)]
pub struct IDATChunk<T> {
    pub data: T,
}
impl<T> WritableChunk for IDATChunk<T>
where
    T: AsRef<[u8]>,
{
    const HEADER: &'static [u8; 4] = HEADER;

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.data.as_ref())
    }
}
