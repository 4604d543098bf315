//! Descriptive statistics and the independent two-sample t-test.
//!
//! The t-test is Student's (pooled variance, equal variances assumed),
//! with a two-sided p-value computed through the regularized incomplete
//! beta function: `p = I_{df/(df+t^2)}(df/2, 1/2)`. The continued-fraction
//! evaluation follows the standard Lentz scheme.

use crate::core::{Result, SketchScoreError};

/// Descriptive summary of one score dataset.
///
/// `std_dev` is the population standard deviation (ddof = 0), matching
/// how the score reports have always been produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

pub fn summarize(name: &str, data: &[f64]) -> Result<Summary> {
    if data.is_empty() {
        return Err(SketchScoreError::InsufficientSamples {
            name: name.to_string(),
            n: 0,
            required: 1,
        });
    }

    let n = data.len();
    let mean = data.iter().sum::<f64>() / n as f64;
    let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    Ok(Summary {
        n,
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
    })
}

/// Result of an independent two-sample t-test.
#[derive(Debug, Clone, PartialEq)]
pub struct TTestResult {
    pub t_statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: f64,
}

/// Student's independent two-sample t-test, two-sided.
///
/// Identical datasets give p = 1; widely separated datasets give p near 0.
/// When both samples have zero variance the statistic is defined by the
/// mean difference alone: equal means score t = 0 (p = 1), unequal means
/// are treated as maximally significant.
pub fn ttest_ind(name_a: &str, a: &[f64], name_b: &str, b: &[f64]) -> Result<TTestResult> {
    for (name, data) in [(name_a, a), (name_b, b)] {
        if data.len() < 2 {
            return Err(SketchScoreError::InsufficientSamples {
                name: name.to_string(),
                n: data.len(),
                required: 2,
            });
        }
    }

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let mean1 = a.iter().sum::<f64>() / n1;
    let mean2 = b.iter().sum::<f64>() / n2;
    let var1 = a.iter().map(|v| (v - mean1).powi(2)).sum::<f64>() / (n1 - 1.0);
    let var2 = b.iter().map(|v| (v - mean2).powi(2)).sum::<f64>() / (n2 - 1.0);

    let df = n1 + n2 - 2.0;
    let pooled_var = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
    let denom = (pooled_var * (1.0 / n1 + 1.0 / n2)).sqrt();

    let (t, p) = if denom == 0.0 {
        if (mean1 - mean2).abs() < f64::EPSILON {
            (0.0, 1.0)
        } else {
            (f64::INFINITY * (mean1 - mean2).signum(), 0.0)
        }
    } else {
        let t = (mean1 - mean2) / denom;
        let x = df / (df + t * t);
        (t, incomplete_beta(df / 2.0, 0.5, x))
    };

    Ok(TTestResult {
        t_statistic: t,
        p_value: p,
        degrees_of_freedom: df,
    })
}

/// T-test over one pair of named datasets, with the 5% significance call.
#[derive(Debug, Clone)]
pub struct PairwiseTTest {
    pub left: String,
    pub right: String,
    pub test: TTestResult,
    pub significant: bool,
}

/// Run t-tests over every pair of datasets, in input order.
pub fn pairwise_ttests(datasets: &[(String, Vec<f64>)]) -> Result<Vec<PairwiseTTest>> {
    let mut results = Vec::new();
    for i in 0..datasets.len() {
        for j in (i + 1)..datasets.len() {
            let (left_name, left) = &datasets[i];
            let (right_name, right) = &datasets[j];
            let test = ttest_ind(left_name, left, right_name, right)?;
            results.push(PairwiseTTest {
                left: left_name.clone(),
                right: right_name.clone(),
                significant: test.p_value < 0.05,
                test,
            });
        }
    }
    Ok(results)
}

/// One entry of the smallest-mean-difference report.
#[derive(Debug, Clone)]
pub struct MeanDifference {
    pub left: String,
    pub right: String,
    pub left_mean: f64,
    pub right_mean: f64,
    pub difference: f64,
}

/// The `k` dataset pairs whose means are closest, ascending by |diff|.
pub fn smallest_mean_differences(datasets: &[(String, Vec<f64>)], k: usize) -> Vec<MeanDifference> {
    let means: Vec<(String, f64)> = datasets
        .iter()
        .filter(|(_, data)| !data.is_empty())
        .map(|(name, data)| (name.clone(), data.iter().sum::<f64>() / data.len() as f64))
        .collect();

    let mut diffs = Vec::new();
    for i in 0..means.len() {
        for j in (i + 1)..means.len() {
            diffs.push(MeanDifference {
                left: means[i].0.clone(),
                right: means[j].0.clone(),
                left_mean: means[i].1,
                right_mean: means[j].1,
                difference: (means[i].1 - means[j].1).abs(),
            });
        }
    }
    diffs.sort_by(|a, b| a.difference.total_cmp(&b.difference));
    diffs.truncate(k);
    diffs
}

/// Lanczos approximation of ln(Gamma(x)), x > 0.
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 6] = [
        76.180_091_729_471_46,
        -86.505_320_329_416_77,
        24.014_098_240_830_91,
        -1.231_739_572_450_155,
        0.120_865_097_386_617_9e-2,
        -0.539_523_938_495_3e-5,
    ];

    let tmp = x + 5.5;
    let tmp = tmp - (x + 0.5) * tmp.ln();
    let mut ser = 1.000_000_000_190_015;
    let mut y = x;
    for c in COEFFS {
        y += 1.0;
        ser += c / y;
    }
    -tmp + (2.506_628_274_631_000_5 * ser / x).ln()
}

/// Continued fraction for the incomplete beta function (modified Lentz).
fn betacf(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITERATIONS: usize = 200;
    const EPS: f64 = 3.0e-14;
    const FPMIN: f64 = 1.0e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITERATIONS {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;

        if (del - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Regularized incomplete beta function I_x(a, b).
fn incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        front * betacf(a, b, x) / a
    } else {
        1.0 - front * betacf(b, a, 1.0 - x) / b
    }
}
