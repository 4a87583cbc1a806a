pub mod jpeg_artifact_sink;
