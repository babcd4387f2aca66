// Dataset assembly — decode, normalize, encode, and batch all four files

use std::path::Path;

use log::info;
use rayon::prelude::*;

use vole_idx::{records, IdxError, TailPolicy};

use crate::batch::Batcher;
use crate::error::{DataError, Result};
use crate::fetch::{fetch_missing, Source};
use crate::onehot::OneHotEncoder;
use crate::scale::PixelRange;
use crate::stage::StagedFiles;
use crate::variant::{Split, Variant};

/// One decoded record: scaled pixels or a one-hot row.
pub type Record = Vec<f32>;
/// One batch of records.
pub type Batch = Vec<Record>;

/// Configuration for [`Dataset`] construction.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Which recognized distribution the files follow.
    pub variant: Variant,
    /// Target range for normalized pixels.
    pub pixel_range: PixelRange,
    /// Number of records per batch.
    pub batch_size: usize,
    /// Whether to shuffle each split before batching.
    pub shuffle: bool,
    /// Optional random seed for reproducible shuffling.
    pub seed: Option<u64>,
    /// What to do with a ragged image payload.
    pub tail: TailPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            variant: Variant::Mnist,
            pixel_range: PixelRange::default(),
            batch_size: 32,
            shuffle: false,
            seed: None,
            tail: TailPolicy::Truncate,
        }
    }
}

impl LoadOptions {
    pub fn variant(mut self, v: Variant) -> Self {
        self.variant = v;
        self
    }

    pub fn pixel_range(mut self, r: PixelRange) -> Self {
        self.pixel_range = r;
        self
    }

    pub fn batch_size(mut self, bs: usize) -> Self {
        self.batch_size = bs;
        self
    }

    pub fn shuffle(mut self, s: bool) -> Self {
        self.shuffle = s;
        self
    }

    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }

    pub fn tail(mut self, t: TailPolicy) -> Self {
        self.tail = t;
        self
    }

    fn batcher(&self) -> Batcher {
        Batcher {
            batch_size: self.batch_size,
            shuffle: self.shuffle,
            seed: self.seed,
        }
    }
}

/// Decompressed contents of the four dataset files.
#[derive(Debug, Clone, Copy)]
pub struct RawSplits<'a> {
    pub train_images: &'a [u8],
    pub train_labels: &'a [u8],
    pub validation_images: &'a [u8],
    pub validation_labels: &'a [u8],
}

/// A fully decoded, normalized, one-hot-encoded, batched dataset.
///
/// All four collections exist before a value does: construction either
/// returns a complete dataset or an error, never something partial, and
/// there is no mutation afterwards. Batch `i` of a split's images pairs
/// record-for-record with batch `i` of its labels because both sides are
/// partitioned by the same shuffle plan.
#[derive(Debug)]
pub struct Dataset {
    train_images: Vec<Batch>,
    train_labels: Vec<Batch>,
    validation_images: Vec<Batch>,
    validation_labels: Vec<Batch>,
    variant: Variant,
    batch_size: usize,
}

impl Dataset {
    /// Load from a directory holding the four canonical files, plain or
    /// `.gz`.
    ///
    /// Compressed files are unpacked into scratch copies that are removed
    /// again before this returns, success or not.
    pub fn load(dir: impl AsRef<Path>, options: LoadOptions) -> Result<Self> {
        let dir = dir.as_ref();
        let files = options.variant.files();
        let staged = StagedFiles::prepare(dir, &files.all())?;

        let train_images = staged.read(files.train_images)?;
        let train_labels = staged.read(files.train_labels)?;
        let validation_images = staged.read(files.validation_images)?;
        let validation_labels = staged.read(files.validation_labels)?;

        Self::from_raw(
            RawSplits {
                train_images: &train_images,
                train_labels: &train_labels,
                validation_images: &validation_images,
                validation_labels: &validation_labels,
            },
            options,
        )
    }

    /// Like [`Dataset::load`], but first asks `source` for any compressed
    /// file that is not already present in `dir`.
    pub fn load_with_source(
        dir: impl AsRef<Path>,
        source: &dyn Source,
        options: LoadOptions,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        fetch_missing(dir, options.variant, source)?;
        Self::load(dir, options)
    }

    /// Build from decompressed bytes directly, no disk involved.
    pub fn from_raw(raw: RawSplits<'_>, options: LoadOptions) -> Result<Self> {
        let files = options.variant.files();
        let opts = &options;

        let (train, validation) = rayon::join(
            || {
                build_split(
                    raw.train_images,
                    raw.train_labels,
                    files.split(Split::Train),
                    opts,
                )
            },
            || {
                build_split(
                    raw.validation_images,
                    raw.validation_labels,
                    files.split(Split::Validation),
                    opts,
                )
            },
        );
        let (train_images, train_labels) = train?;
        let (validation_images, validation_labels) = validation?;

        info!(
            "{}: {} train / {} validation batches of {}",
            options.variant.name(),
            train_images.len(),
            validation_images.len(),
            options.batch_size
        );

        Ok(Self {
            train_images,
            train_labels,
            validation_images,
            validation_labels,
            variant: options.variant,
            batch_size: options.batch_size,
        })
    }

    /// Build a synthetic dataset with random pixels and labels, shaped like
    /// a real one but as small as you want. Useful for demos and tests.
    pub fn synthetic(train_n: usize, validation_n: usize, options: LoadOptions) -> Result<Self> {
        use rand::Rng;
        use vole_idx::{build_idx1_bytes, build_idx3_bytes};

        let (rows, cols) = options.variant.image_dims();
        if options.variant.num_classes() == 0 {
            return Err(DataError::ZeroClasses);
        }
        let classes = options.variant.num_classes().min(u8::MAX as usize) as u8;
        let mut rng = rand::thread_rng();

        let mut synth = |n: usize| {
            let images: Vec<Vec<u8>> = (0..n)
                .map(|_| (0..rows * cols).map(|_| rng.gen()).collect())
                .collect();
            let labels: Vec<u8> = (0..n).map(|_| rng.gen_range(0..classes)).collect();
            let views: Vec<&[u8]> = images.iter().map(|v| v.as_slice()).collect();
            (
                build_idx3_bytes(&views, rows as u32, cols as u32),
                build_idx1_bytes(&labels),
            )
        };

        let (train_images, train_labels) = synth(train_n);
        let (validation_images, validation_labels) = synth(validation_n);

        Self::from_raw(
            RawSplits {
                train_images: &train_images,
                train_labels: &train_labels,
                validation_images: &validation_images,
                validation_labels: &validation_labels,
            },
            options,
        )
    }

    /// Batched, normalized training images.
    pub fn train_images(&self) -> &[Batch] {
        &self.train_images
    }

    /// Batched one-hot training labels, aligned with [`Self::train_images`].
    pub fn train_labels(&self) -> &[Batch] {
        &self.train_labels
    }

    /// Batched, normalized validation images.
    pub fn validation_images(&self) -> &[Batch] {
        &self.validation_images
    }

    /// Batched one-hot validation labels, aligned with
    /// [`Self::validation_images`].
    pub fn validation_labels(&self) -> &[Batch] {
        &self.validation_labels
    }

    /// Which distribution the files were decoded as.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Records per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

/// Decode, transform, and batch one split. Images and labels go through the
/// same plan so their batch orders stay aligned.
fn build_split(
    image_bytes: &[u8],
    label_bytes: &[u8],
    names: (&str, &str),
    options: &LoadOptions,
) -> Result<(Vec<Batch>, Vec<Batch>)> {
    let (image_name, label_name) = names;

    let (image_spans, label_spans) = rayon::join(
        || {
            records(image_bytes, options.variant.image_format(), options.tail)
                .map_err(|e| malformed(image_name, e))
        },
        || {
            records(label_bytes, options.variant.label_format(), options.tail)
                .map_err(|e| malformed(label_name, e))
        },
    );
    let image_spans = image_spans?;
    let label_spans = label_spans?;

    if image_spans.len() != label_spans.len() {
        return Err(DataError::CountMismatch {
            images: image_spans.len(),
            labels: label_spans.len(),
        });
    }

    let range = options.pixel_range;
    let images: Vec<Record> = image_spans
        .par_iter()
        .map(|span| range.scale_record(span))
        .collect();

    let encoder = OneHotEncoder::new(options.variant.num_classes())?;
    let labels: Vec<Record> = label_spans
        .iter()
        // label spans come from a 1-byte record format, exactly one byte each
        .map(|span| encoder.encode(span[0]))
        .collect::<Result<_>>()?;

    let plan = options.batcher().plan(images.len())?;
    Ok((plan.apply(&images)?, plan.apply(&labels)?))
}

fn malformed(name: &str, source: IdxError) -> DataError {
    DataError::Malformed {
        name: name.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vole_idx::{build_idx1_bytes, build_idx3_bytes};

    fn tiny_options() -> LoadOptions {
        LoadOptions::default()
            .variant(Variant::Custom {
                rows: 2,
                cols: 2,
                classes: 10,
            })
            .batch_size(2)
    }

    fn tiny_raw(n: usize) -> (Vec<u8>, Vec<u8>) {
        let images: Vec<Vec<u8>> = (0..n).map(|i| vec![i as u8; 4]).collect();
        let labels: Vec<u8> = (0..n).map(|i| (i % 10) as u8).collect();
        let views: Vec<&[u8]> = images.iter().map(|v| v.as_slice()).collect();
        (build_idx3_bytes(&views, 2, 2), build_idx1_bytes(&labels))
    }

    #[test]
    fn test_from_raw_builds_all_four_collections() {
        let (ti, tl) = tiny_raw(6);
        let (vi, vl) = tiny_raw(4);
        let ds = Dataset::from_raw(
            RawSplits {
                train_images: &ti,
                train_labels: &tl,
                validation_images: &vi,
                validation_labels: &vl,
            },
            tiny_options(),
        )
        .unwrap();

        assert_eq!(ds.train_images().len(), 3);
        assert_eq!(ds.train_labels().len(), 3);
        assert_eq!(ds.validation_images().len(), 2);
        assert_eq!(ds.validation_labels().len(), 2);
        assert_eq!(ds.batch_size(), 2);

        for batch in ds.train_images() {
            assert_eq!(batch.len(), 2);
            for record in batch {
                assert_eq!(record.len(), 4);
            }
        }
    }

    #[test]
    fn test_count_mismatch_aborts() {
        let (ti, _) = tiny_raw(3);
        let tl = build_idx1_bytes(&[0, 1]); // one label short
        let (vi, vl) = tiny_raw(2);
        let err = Dataset::from_raw(
            RawSplits {
                train_images: &ti,
                train_labels: &tl,
                validation_images: &vi,
                validation_labels: &vl,
            },
            tiny_options(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DataError::CountMismatch {
                images: 3,
                labels: 2
            }
        ));
    }

    #[test]
    fn test_invalid_label_aborts() {
        let (ti, _) = tiny_raw(2);
        let tl = build_idx1_bytes(&[3, 12]); // 12 is out of range for 10 classes
        let (vi, vl) = tiny_raw(2);
        let err = Dataset::from_raw(
            RawSplits {
                train_images: &ti,
                train_labels: &tl,
                validation_images: &vi,
                validation_labels: &vl,
            },
            tiny_options(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidLabel {
                label: 12,
                classes: 10
            }
        ));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let (ti, tl) = tiny_raw(2);
        let (vi, vl) = tiny_raw(2);
        let err = Dataset::from_raw(
            RawSplits {
                train_images: &ti,
                train_labels: &tl,
                validation_images: &vi,
                validation_labels: &vl,
            },
            tiny_options().batch_size(0),
        )
        .unwrap_err();
        assert!(matches!(err, DataError::InvalidBatchSize));
    }

    #[test]
    fn test_synthetic_shapes() {
        let ds = Dataset::synthetic(64, 16, LoadOptions::default().batch_size(16)).unwrap();
        assert_eq!(ds.train_images().len(), 4);
        assert_eq!(ds.validation_images().len(), 1);
        assert_eq!(ds.train_images()[0][0].len(), 784);
        assert_eq!(ds.train_labels()[0][0].len(), 10);
    }

    #[test]
    fn test_synthetic_pixels_live_in_range() {
        let options = LoadOptions::default()
            .batch_size(8)
            .pixel_range(PixelRange::new(-1.0, 1.0).unwrap());
        let ds = Dataset::synthetic(16, 8, options).unwrap();
        for batch in ds.train_images() {
            for record in batch {
                for &v in record {
                    assert!((-1.0..=1.0).contains(&v), "pixel {v} out of range");
                }
            }
        }
    }
}
