mod gray;

pub use gray::gray_mean_from_rgb;
