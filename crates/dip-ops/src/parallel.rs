//! Row-parallel iteration.
//!
//! Every neighbourhood kernel in this crate writes one output row from a
//! read-only source, so rows are independent. With the `parallel` feature
//! the rows are distributed over the rayon pool, otherwise they run in
//! order on the calling thread.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `width`-sample row of `dst`.
pub fn for_each_row<T, F>(dst: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if width == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_get_their_index() {
        let mut buf = vec![0usize; 5 * 4];
        for_each_row(&mut buf, 5, |y, row| row.iter_mut().for_each(|v| *v = y));
        assert_eq!(&buf[15..20], &[3; 5]);
        assert_eq!(&buf[0..5], &[0; 5]);
    }

    #[test]
    fn test_zero_width_is_noop() {
        let mut buf: Vec<u8> = Vec::new();
        for_each_row(&mut buf, 0, |_, _| unreachable!());
    }
}
