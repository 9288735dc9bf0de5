//! Picture URLs attached to songs on save.

use rand::Rng;

/// Number of pictures available on the image host.
const MAX_PICTURES: u32 = 20;

/// Decides what goes into the `image` field of create/update requests.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ImagePolicy {
    /// Leave the field out of the request.
    #[default]
    Omit,
    /// Attach a random picture URL on every save.
    Random,
}

impl ImagePolicy {
    pub fn image_for_save(self) -> Option<String> {
        match self {
            ImagePolicy::Omit => None,
            ImagePolicy::Random => Some(random_image_url(&mut rand::thread_rng())),
        }
    }
}

/// Pick one of the pictures. Zero is folded into one, so picture 1 is drawn
/// twice as often as the others.
pub fn random_image_url<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number = rng.gen_range(0..MAX_PICTURES).max(1);
    image_url(number)
}

fn image_url(number: u32) -> String {
    format!("https://generatorfun.com/code/uploads/Random-Medieval-image-{number}.jpg")
}
