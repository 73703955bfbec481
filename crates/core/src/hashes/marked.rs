use std::io::Write;

/// A marked digest. Wraps a raw digest type to give it a specific purpose.
pub trait MarkedDigest: Default + Copy {
    /// The underlying digest type
    type Digest;

    /// Wrap a digest in the marked type
    fn new(hash: Self::Digest) -> Self;

    /// Return a copy of the underlying digest
    fn internal(&self) -> Self::Digest;

    /// Return a vector containing the digest bytes
    fn bytes(&self) -> Vec<u8>;

    /// Return a copy of the marked digest with its bytes in reverse order. Bitcoin digests are
    /// displayed big-endian, but serialized little-endian.
    fn reversed(&self) -> Self;
}

/// A `Write` interface that produces a digest when finished.
pub trait MarkedDigestWriter<T>: Default + Write {
    /// Consume the writer and produce the digest.
    fn finish(self) -> T;

    /// Consume the writer and produce a marked digest.
    fn finish_marked<M: MarkedDigest<Digest = T>>(self) -> M {
        MarkedDigest::new(self.finish())
    }
}
