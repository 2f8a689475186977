use gradfit::polynomial_regression;

fn main() -> gradfit::Result<()> {
    // y = 2 - 3x + x^2 sampled on [-1, 1]
    let xs: Vec<f64> = (0..=20).map(|i| -1.0 + 0.1 * i as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 2.0 - 3.0 * x + x * x).collect();

    let fit = polynomial_regression(&xs, &ys, 2)?;

    println!("coefficients (constant term first): {:?}", fit.params);
    println!("mean absolute error: {:.6}", fit.loss);
    println!("iterations: {} ({:?})", fit.iterations, fit.termination);
    println!("snapped to integers: {}", fit.prettified);
    Ok(())
}
