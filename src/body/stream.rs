use std::collections::VecDeque;
use std::io;

use super::Fragment;

/// Sequential reader over fragments, see [`to_stream`].
///
/// Reads drain the current fragment reader before moving to the next one, nothing is buffered
/// ahead. Dropping the stream stops the concatenation.
#[derive(Debug)]
pub struct BodyStream<R> {
    current: Option<R>,
    pending: VecDeque<R>,
}

/// Returns a stream that reads each fragment in order.
pub fn to_stream<F: Fragment>(fragments: &[F]) -> BodyStream<F::Reader> {
    let mut pending: VecDeque<_> = fragments.iter().map(F::reader).collect();
    BodyStream {
        current: pending.pop_front(),
        pending,
    }
}

impl<R> BodyStream<R> {
    /// Returns the number of fragments not yet fully read.
    pub fn remaining_fragments(&self) -> usize {
        self.pending.len() + usize::from(self.current.is_some())
    }

    fn advance(&mut self) {
        self.current = self.pending.pop_front();
    }
}

impl<R: io::Read> io::Read for BodyStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while let Some(reader) = &mut self.current {
            match reader.read(buf)? {
                0 => self.advance(),
                read => return Ok(read),
            }
        }

        Ok(0)
    }
}

#[cfg(feature = "tokio")]
mod rt_tokio {
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll, ready};
    use tokio::io::{AsyncRead, ReadBuf};

    use super::BodyStream;

    impl<R: AsyncRead + Unpin> AsyncRead for BodyStream<R> {
        fn poll_read(
            self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let me = self.get_mut();

            if buf.remaining() == 0 {
                return Poll::Ready(Ok(()));
            }

            while let Some(reader) = &mut me.current {
                let filled = buf.filled().len();
                ready!(Pin::new(reader).poll_read(cx, buf))?;
                if buf.filled().len() != filled {
                    return Poll::Ready(Ok(()));
                }
                me.advance();
            }

            Poll::Ready(Ok(()))
        }
    }
}
