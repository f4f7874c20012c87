pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f32 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f32).sqrt()
    }

    pub fn mean(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f32>() / samples.len() as f32
    }

    /// Sample standard deviation with the N-1 divisor; zero below two samples.
    pub fn std_dev(samples: &[f32]) -> f32 {
        if samples.len() < 2 {
            return 0.0;
        }
        let mean = Self::mean(samples);
        let sum_sq: f32 = samples.iter().map(|&v| (v - mean) * (v - mean)).sum();
        (sum_sq / (samples.len() - 1) as f32).sqrt()
    }
}
