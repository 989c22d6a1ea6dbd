/*!
misc.rs - NOP kernel.

`NOP` has no effect beyond the PC advance its addressing mode (Implied)
already performs during fetch.
*/

#[inline]
pub(crate) fn nop() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nop_is_a_true_no_op() {
        nop();
    }
}
