//! Test support: an [`AsyncRead`] fed from a channel of byte chunks, used
//! to drive the parser with data arriving incrementally. Closing the
//! sending half reads as EOF.

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::mpsc;

pub struct ChunkReader {
    rx: mpsc::Receiver<Vec<u8>>,
    pending: VecDeque<u8>,
}

impl ChunkReader {
    pub fn new(rx: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            rx,
            pending: VecDeque::new(),
        }
    }

    pub fn pair(capacity: usize) -> (mpsc::Sender<Vec<u8>>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx))
    }
}

impl AsyncRead for ChunkReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let me = self.get_mut();
        let mut delivered = false;
        loop {
            while buf.remaining() > 0 {
                let Some(byte) = me.pending.pop_front() else {
                    break;
                };
                buf.put_slice(&[byte]);
                delivered = true;
            }
            if buf.remaining() == 0 {
                return Poll::Ready(Ok(()));
            }
            match me.rx.poll_recv(cx) {
                Poll::Ready(Some(chunk)) => me.pending.extend(chunk),
                // Channel closed: EOF once the pending bytes are drained.
                Poll::Ready(None) => return Poll::Ready(Ok(())),
                Poll::Pending => {
                    return if delivered {
                        Poll::Ready(Ok(()))
                    } else {
                        Poll::Pending
                    };
                }
            }
        }
    }
}
