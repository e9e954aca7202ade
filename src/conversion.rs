use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::annotation::build_annotation;
use crate::config::Args;
use crate::error::Result;
use crate::extract::extract;
use crate::io::{create_output_directory, find_xml_files, write_json};
use crate::report::Reporter;
use crate::types::{AnnotationDocument, Extraction, ProcessingStats, SkipReason};
use crate::utils::output_path_for;
use crate::xml;

/// Result of converting one XML document in memory.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Converted(AnnotationDocument),
    Skipped(SkipReason),
}

/// Result of converting one file on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Converted(PathBuf),
    Skipped(SkipReason),
}

/// Parse, extract and build the Label Studio document for one Pascal VOC file.
pub fn convert_document(xml_text: &str) -> Result<Conversion> {
    if xml_text.trim().is_empty() {
        return Ok(Conversion::Skipped(SkipReason::EmptyFile));
    }

    let document = xml::parse(xml_text)?;
    let conversion = match extract(&document)? {
        Extraction::MissingSize { .. } => Conversion::Skipped(SkipReason::MissingSize),
        Extraction::MissingBoxes { .. } => Conversion::Skipped(SkipReason::MissingBoxes),
        Extraction::MissingFilename { .. } => Conversion::Skipped(SkipReason::MissingFilename),
        Extraction::Ready {
            filename,
            size,
            boxes,
        } => Conversion::Converted(build_annotation(&filename, size, &boxes)),
    };
    Ok(conversion)
}

/// Convert `source` and write `<stem>.json` into `output_dir` when it yields a document.
pub fn convert_file(source: &Path, output_dir: &Path) -> Result<FileOutcome> {
    let content = fs::read_to_string(source)?;
    match convert_document(&content)? {
        Conversion::Converted(document) => {
            let output = output_path_for(source, output_dir);
            write_json(&document, &output)?;
            Ok(FileOutcome::Converted(output))
        }
        Conversion::Skipped(reason) => Ok(FileOutcome::Skipped(reason)),
    }
}

/// Convert every file in order, one at a time.
///
/// A failing file is reported and counted, and the batch moves on. With
/// `strict` set the first failure aborts the batch instead, carrying the path
/// of the offending file.
pub fn convert_files(
    files: &[PathBuf],
    output_dir: &Path,
    strict: bool,
    reporter: &mut dyn Reporter,
) -> Result<ProcessingStats> {
    let mut stats = ProcessingStats::new();
    reporter.started(files.len());

    for source in files {
        stats.increment_total();
        match convert_file(source, output_dir) {
            Ok(FileOutcome::Converted(output)) => {
                stats.increment_successful();
                reporter.converted(source, &output);
            }
            Ok(FileOutcome::Skipped(reason)) => {
                stats.increment_skipped(reason);
                reporter.skipped(source, reason);
            }
            Err(e) if strict => return Err(e.in_file(source)),
            Err(e) => {
                stats.increment_failed();
                reporter.failed(source, &e);
            }
        }
    }

    Ok(stats)
}

/// Convert all Pascal VOC files under `args.file_dir` into `args.save_dir`.
pub fn process_directory(args: &Args, reporter: &mut dyn Reporter) -> Result<ProcessingStats> {
    let input_dir = PathBuf::from(&args.file_dir);
    let files = find_xml_files(&input_dir)?;
    info!("Found {} annotation file(s) in {}", files.len(), input_dir.display());

    let output_dir = create_output_directory(Path::new(&args.save_dir))?;
    convert_files(&files, &output_dir, args.strict, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_document_end_to_end() {
        let xml = r#"<annotation>
            <folder>VOC2007</folder>
            <filename>a.jpg</filename>
            <size><width>100</width><height>200</height><depth>3</depth></size>
            <object>
                <name>cat</name>
                <difficult>0</difficult>
                <bndbox><xmin>10</xmin><ymin>20</ymin><xmax>60</xmax><ymax>120</ymax></bndbox>
            </object>
        </annotation>"#;

        let document = match convert_document(xml).unwrap() {
            Conversion::Converted(document) => document,
            other => panic!("unexpected conversion: {:?}", other),
        };

        assert_eq!(document.data.image, "a.jpg");
        let record = &document.annotations[0].result[0];
        assert_eq!(record.original_height, 200);
        assert_eq!(record.original_width, 100);
        assert_eq!(record.id, "box_1");
        assert_eq!(record.value.x, 10.0);
        assert_eq!(record.value.y, 10.0);
        assert_eq!(record.value.width, 50.0);
        assert_eq!(record.value.height, 50.0);
        assert_eq!(record.value.rectanglelabels, vec!["cat".to_string()]);
    }

    #[test]
    fn test_convert_document_skips() {
        assert_eq!(
            convert_document("  \n ").unwrap(),
            Conversion::Skipped(SkipReason::EmptyFile)
        );
        assert_eq!(
            convert_document("<annotation><filename>a.jpg</filename></annotation>").unwrap(),
            Conversion::Skipped(SkipReason::MissingSize)
        );
        assert_eq!(
            convert_document(
                "<annotation><filename>a.jpg</filename>\
                 <size><width>10</width><height>10</height></size></annotation>"
            )
            .unwrap(),
            Conversion::Skipped(SkipReason::MissingBoxes)
        );

        let bndbox = "<bndbox><xmin>1</xmin><ymin>1</ymin><xmax>5</xmax><ymax>5</ymax></bndbox>";
        for filename in ["", "<filename/>", "<filename></filename>"] {
            let xml = format!(
                "<annotation>{}<size><width>10</width><height>10</height></size>\
                 <object><name>cat</name>{}</object></annotation>",
                filename, bndbox
            );
            assert_eq!(
                convert_document(&xml).unwrap(),
                Conversion::Skipped(SkipReason::MissingFilename)
            );
        }
    }

    #[test]
    fn test_convert_document_errors() {
        assert!(convert_document("<annotation>").is_err());
        assert!(convert_document("<something/>").is_err());
    }
}
