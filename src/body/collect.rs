use bytes::{Bytes, BytesMut};

use super::Fragment;

/// Concatenate all fragments into one buffer.
///
/// A single fragment is returned as is, without copying.
pub fn to_bytes<F: Fragment>(fragments: &[F]) -> Bytes {
    match fragments {
        [] => Bytes::new(),
        [fragment] => fragment.bytes(),
        _ => {
            let capacity = fragments.iter().map(F::len).sum();
            let mut buffer = Buffer::None;
            for fragment in fragments {
                buffer.push(fragment.bytes(), capacity);
            }
            buffer.freeze()
        }
    }
}

/// Concatenate fragments into one buffer of at most `max_len` bytes.
///
/// Fragments past the limit are not read. A fragment that is cut by the limit is copied, so the
/// returned buffer never keeps the rest of it alive, while a fragment that fits entirely is
/// returned as is when it is the only one.
pub fn to_bounded_bytes<F: Fragment>(fragments: &[F], max_len: usize) -> Bytes {
    let capacity = fragments.iter().map(F::len).sum::<usize>().min(max_len);
    let mut buffer = Buffer::None;
    let mut remaining = max_len;

    for fragment in fragments {
        if remaining == 0 {
            break;
        }

        let mut chunk = fragment.bytes();
        if chunk.len() > remaining {
            chunk = Bytes::copy_from_slice(&chunk[..remaining]);
        }

        remaining -= chunk.len();
        buffer.push(chunk, capacity);
    }

    buffer.freeze()
}

/// Concatenation state, only copy once there is more than one chunk.
#[derive(Debug)]
enum Buffer {
    None,
    Ref(Bytes),
    Mut(BytesMut),
}

impl Buffer {
    fn push(&mut self, chunk: Bytes, capacity: usize) {
        if chunk.is_empty() {
            return;
        }

        match self {
            Buffer::None => *self = Buffer::Ref(chunk),
            Buffer::Ref(bytes) => {
                // more than one chunk, concatenation requires copy
                let mut bytes_mut = BytesMut::with_capacity(capacity.max(bytes.len() + chunk.len()));
                bytes_mut.extend_from_slice(bytes);
                bytes_mut.extend_from_slice(&chunk);
                *self = Buffer::Mut(bytes_mut);
            }
            Buffer::Mut(bytes_mut) => bytes_mut.extend_from_slice(&chunk),
        }
    }

    fn freeze(self) -> Bytes {
        match self {
            Buffer::None => Bytes::new(),
            Buffer::Ref(bytes) => bytes,
            Buffer::Mut(bytes_mut) => bytes_mut.freeze(),
        }
    }
}
