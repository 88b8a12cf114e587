use crate::Decimal;
use proptest::arbitrary::Arbitrary;
use proptest::prelude::*;

impl Arbitrary for Decimal {
    type Parameters = ();
    type Strategy = BoxedStrategy<Decimal>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale))
            .boxed()
    }
}
