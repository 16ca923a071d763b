mod fixtures;

use fixtures::ma_reference_test;
use quantedge_core::MovingAverage;

// Windowed averages are exact decimal arithmetic; the float reference
// carries its own rounding.
ma_reference_test!(
    sma_20_close,
    MovingAverage::Simple,
    20,
    "tests/fixtures/data/sma-20-close.csv",
    1e-9
);

ma_reference_test!(
    wma_10_close,
    MovingAverage::Weighted,
    10,
    "tests/fixtures/data/wma-10-close.csv",
    1e-9
);

ma_reference_test!(
    hma_16_close,
    MovingAverage::Hull,
    16,
    "tests/fixtures/data/hma-16-close.csv",
    1e-9
);

// Recursive filters keep infinite memory; 1e-6 leaves room for the float
// reference's accumulated error.
ma_reference_test!(
    ema_20_close,
    MovingAverage::Exponential,
    20,
    "tests/fixtures/data/ema-20-close.csv",
    1e-6
);

ma_reference_test!(
    rma_14_close,
    MovingAverage::Wilder,
    14,
    "tests/fixtures/data/rma-14-close.csv",
    1e-6
);

ma_reference_test!(
    kama_10_close,
    MovingAverage::kaufman_adaptive(),
    10,
    "tests/fixtures/data/kama-10-close.csv",
    1e-6
);
