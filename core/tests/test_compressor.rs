mod common;

#[cfg(test)]
mod compressor_tests {
    use zstream_core::{
        compress::{EndDirective, RichMemZstdCompressor, ZstdCompressor},
        decompress,
        decompress::EndlessZstdDecompressor,
        frame::get_frame_size,
        params::{multithread_supported, CParameter, CompressOptions, LevelOrOption},
        CodecWarning, ZstdError,
    };

    use crate::common::{corpus, noise};

    #[test]
    fn starts_with_frame_closed() {
        let c = ZstdCompressor::new(None, None).unwrap();
        assert_eq!(c.last_mode(), EndDirective::FlushFrame);
        assert!(!c.is_multithreaded());
        assert!(c.warnings().is_empty());
    }

    #[test]
    fn chunked_continue_then_flush_frame() {
        let data = corpus(500_000);
        let c = ZstdCompressor::with_level(3).unwrap();

        let mut out = Vec::new();
        for chunk in data.chunks(7_919) {
            out.extend(c.compress(chunk, EndDirective::Continue).unwrap());
            assert_eq!(c.last_mode(), EndDirective::Continue);
        }
        out.extend(c.flush(EndDirective::FlushFrame).unwrap());
        assert_eq!(c.last_mode(), EndDirective::FlushFrame);

        assert_eq!(decompress(&out, None, None).unwrap(), data);
    }

    #[test]
    fn flush_block_makes_everything_so_far_decodable() {
        let first = corpus(40_000);
        let c = ZstdCompressor::new(None, None).unwrap();
        let d = EndlessZstdDecompressor::new(None, None).unwrap();

        let mut partial = c.compress(&first, EndDirective::Continue).unwrap();
        partial.extend(c.flush(EndDirective::FlushBlock).unwrap());
        assert_eq!(c.last_mode(), EndDirective::FlushBlock);

        assert_eq!(d.decompress(&partial, None).unwrap(), first);
        assert!(!d.at_frame_edge());

        let tail = c.flush(EndDirective::FlushFrame).unwrap();
        assert!(d.decompress(&tail, None).unwrap().is_empty());
        assert!(d.at_frame_edge());
    }

    #[test]
    fn flush_rejects_continue() {
        let c = ZstdCompressor::new(None, None).unwrap();
        let err = c.flush(EndDirective::Continue).unwrap_err();
        assert!(matches!(err, ZstdError::InvalidArgument(_)));
        assert_eq!(c.last_mode(), EndDirective::FlushFrame);
    }

    #[test]
    fn one_compressor_many_frames() {
        let a = corpus(30_000);
        let b = noise(5_000, 11);
        let c = ZstdCompressor::new(None, None).unwrap();

        let fa = c.compress(&a, EndDirective::FlushFrame).unwrap();
        let fb = c.compress(&b, EndDirective::FlushFrame).unwrap();
        assert_eq!(get_frame_size(&fa).unwrap(), fa.len());

        let mut joined = fa.clone();
        joined.extend_from_slice(&fb);
        assert_eq!(get_frame_size(&joined).unwrap(), fa.len());

        let mut expected = a.clone();
        expected.extend_from_slice(&b);
        assert_eq!(decompress(&joined, None, None).unwrap(), expected);
    }

    #[test]
    fn checksum_flag_adds_four_bytes() {
        let data = corpus(10_000);
        let plain = CompressOptions::new()
            .with(CParameter::CompressionLevel, 3)
            .with(CParameter::ChecksumFlag, 0);
        let checked = plain.clone().with(CParameter::ChecksumFlag, 1);

        let a = ZstdCompressor::new(Some(&LevelOrOption::Options(plain)), None)
            .unwrap()
            .compress(&data, EndDirective::FlushFrame)
            .unwrap();
        let b = ZstdCompressor::new(Some(&LevelOrOption::Options(checked)), None)
            .unwrap()
            .compress(&data, EndDirective::FlushFrame)
            .unwrap();

        assert_eq!(b.len(), a.len() + 4);
        assert_eq!(decompress(&b, None, None).unwrap(), data);
    }

    #[test]
    fn worker_threads_round_trip() {
        let data = corpus(2_000_000);
        let opts = CompressOptions::new()
            .with(CParameter::CompressionLevel, 3)
            .with(CParameter::NbWorkers, 2);
        let c = ZstdCompressor::new(Some(&LevelOrOption::Options(opts)), None).unwrap();
        assert_eq!(c.is_multithreaded(), multithread_supported());

        let mut out = Vec::new();
        for chunk in data.chunks(100_000) {
            out.extend(c.compress(chunk, EndDirective::Continue).unwrap());
        }
        out.extend(c.flush(EndDirective::FlushFrame).unwrap());
        assert_eq!(decompress(&out, None, None).unwrap(), data);
    }

    #[test]
    fn richmem_with_workers_warns() {
        let opts = CompressOptions::new().with(CParameter::NbWorkers, 4);
        let c = RichMemZstdCompressor::new(Some(&LevelOrOption::Options(opts)), None).unwrap();

        if multithread_supported() {
            assert_eq!(c.warnings(), &[CodecWarning::RichMemoryMultithread]);
        } else {
            assert_eq!(c.warnings(), &[CodecWarning::MultithreadUnsupported]);
        }

        let data = corpus(64_000);
        assert_eq!(decompress(&c.compress(&data).unwrap(), None, None).unwrap(), data);
    }

    #[test]
    fn compressor_is_shareable_across_threads() {
        let c = std::sync::Arc::new(ZstdCompressor::new(None, None).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let c = std::sync::Arc::clone(&c);
                std::thread::spawn(move || {
                    let data = corpus(1_000 * (i + 1));
                    (c.compress(&data, EndDirective::FlushFrame).unwrap(), data)
                })
            })
            .collect();

        for handle in handles {
            let (frame, data) = handle.join().unwrap();
            assert_eq!(decompress(&frame, None, None).unwrap(), data);
        }
    }

    #[test]
    fn richmem_debug_lists_warnings() {
        let c = RichMemZstdCompressor::new(None, None).unwrap();
        assert!(format!("{c:?}").starts_with("RichMemZstdCompressor { warnings: []"));
    }
}
