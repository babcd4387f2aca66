// Dataset variants — recognized distributions and their fixed constants

use vole_idx::RecordFormat;

/// Which half of a dataset a file pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Validation,
}

/// A recognized dataset distribution.
///
/// MNIST and Fashion-MNIST share the classic layout: 28x28 images, 10
/// classes, the same four canonical file names. `Custom` covers any other
/// distribution that follows the same file scheme with different sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Mnist,
    FashionMnist,
    Custom {
        rows: usize,
        cols: usize,
        classes: usize,
    },
}

/// Canonical file names of one distribution, in decompressed form (the
/// distributed form appends `.gz`).
#[derive(Debug, Clone, Copy)]
pub struct VariantFiles {
    pub train_images: &'static str,
    pub train_labels: &'static str,
    pub validation_images: &'static str,
    pub validation_labels: &'static str,
}

impl VariantFiles {
    /// All four names, train pair first.
    pub fn all(&self) -> [&'static str; 4] {
        [
            self.train_images,
            self.train_labels,
            self.validation_images,
            self.validation_labels,
        ]
    }

    /// The (images, labels) pair of one split.
    pub fn split(&self, split: Split) -> (&'static str, &'static str) {
        match split {
            Split::Train => (self.train_images, self.train_labels),
            Split::Validation => (self.validation_images, self.validation_labels),
        }
    }
}

impl Variant {
    /// Image size as (rows, cols).
    pub fn image_dims(&self) -> (usize, usize) {
        match self {
            Variant::Mnist | Variant::FashionMnist => (28, 28),
            Variant::Custom { rows, cols, .. } => (*rows, *cols),
        }
    }

    /// Pixels per image record.
    pub fn pixel_count(&self) -> usize {
        let (rows, cols) = self.image_dims();
        rows * cols
    }

    /// Number of label classes.
    pub fn num_classes(&self) -> usize {
        match self {
            Variant::Mnist | Variant::FashionMnist => 10,
            Variant::Custom { classes, .. } => *classes,
        }
    }

    /// Layout of this variant's image files.
    pub fn image_format(&self) -> RecordFormat {
        RecordFormat::idx3_images(self.pixel_count())
    }

    /// Layout of this variant's label files.
    pub fn label_format(&self) -> RecordFormat {
        RecordFormat::idx1_labels()
    }

    /// Canonical decompressed file names (shared across the family).
    pub fn files(&self) -> VariantFiles {
        VariantFiles {
            train_images: "train-images-idx3-ubyte",
            train_labels: "train-labels-idx1-ubyte",
            validation_images: "t10k-images-idx3-ubyte",
            validation_labels: "t10k-labels-idx1-ubyte",
        }
    }

    /// Canonical download location for the compressed files, when one exists.
    pub fn base_url(&self) -> Option<&'static str> {
        match self {
            Variant::Mnist => Some("https://yann.lecun.com/exdb/mnist/"),
            Variant::FashionMnist => {
                Some("http://fashion-mnist.s3-website.eu-central-1.amazonaws.com/")
            }
            Variant::Custom { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Mnist => "MNIST",
            Variant::FashionMnist => "Fashion-MNIST",
            Variant::Custom { .. } => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout_constants() {
        for v in [Variant::Mnist, Variant::FashionMnist] {
            assert_eq!(v.pixel_count(), 784);
            assert_eq!(v.num_classes(), 10);
            assert_eq!(v.image_format().header_len, 16);
            assert_eq!(v.image_format().record_len, 784);
            assert_eq!(v.label_format().header_len, 8);
            assert_eq!(v.label_format().record_len, 1);
        }
    }

    #[test]
    fn test_custom_layout() {
        let v = Variant::Custom {
            rows: 1,
            cols: 3,
            classes: 4,
        };
        assert_eq!(v.pixel_count(), 3);
        assert_eq!(v.num_classes(), 4);
        assert_eq!(v.image_format().record_len, 3);
        assert!(v.base_url().is_none());
    }

    #[test]
    fn test_file_names() {
        let files = Variant::Mnist.files();
        assert_eq!(files.all()[0], "train-images-idx3-ubyte");
        let (imgs, lbls) = files.split(Split::Validation);
        assert_eq!(imgs, "t10k-images-idx3-ubyte");
        assert_eq!(lbls, "t10k-labels-idx1-ubyte");
    }
}
