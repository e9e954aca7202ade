use crate::error::{ConvertError, Result};
use crate::geometry::{ensure_non_zero, PixelBox};
use crate::types::{Extraction, ImageSize, NormalizedBox};
use crate::xml::XmlValue;

/// Pull the file name, image size and normalized boxes out of a parsed
/// Pascal VOC document.
///
/// A missing `size` node yields [`Extraction::MissingSize`] even when objects
/// are present; a record with a size but no `object` entries yields
/// [`Extraction::MissingBoxes`]. Boxes are still read when `filename` is
/// absent or empty, and the record then yields [`Extraction::MissingFilename`].
/// Missing `bndbox` nodes and coordinates that are not integers are errors.
pub fn extract(document: &XmlValue) -> Result<Extraction> {
    let annotation = document
        .get("annotation")
        .ok_or_else(|| ConvertError::MissingNode("annotation".to_string()))?;

    let filename = annotation
        .get("filename")
        .and_then(XmlValue::as_text)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let size_node = match annotation.get("size") {
        Some(node) if !node.is_empty() => node,
        _ => return Ok(Extraction::MissingSize { filename }),
    };
    let size = ImageSize {
        height: read_integer(size_node, "height", "size")?,
        width: read_integer(size_node, "width", "size")?,
    };

    let objects = annotation
        .get("object")
        .map(XmlValue::as_list)
        .unwrap_or_default();
    if objects.is_empty() {
        return Ok(Extraction::MissingBoxes { filename, size });
    }
    ensure_non_zero(size)?;

    let boxes = objects
        .into_iter()
        .enumerate()
        .map(|(index, object)| read_object(object, index, size))
        .collect::<Result<Vec<_>>>()?;

    Ok(match filename {
        Some(filename) => Extraction::Ready {
            filename,
            size,
            boxes,
        },
        None => Extraction::MissingFilename { size, boxes },
    })
}

fn read_object(object: &XmlValue, index: usize, size: ImageSize) -> Result<NormalizedBox> {
    let path = format!("object[{}]", index);
    let label = object
        .get("name")
        .and_then(XmlValue::as_text)
        .unwrap_or_default()
        .to_string();

    let bndbox_path = format!("{}.bndbox", path);
    let bndbox = object
        .get("bndbox")
        .ok_or_else(|| ConvertError::MissingNode(bndbox_path.clone()))?;

    let pixel_box = PixelBox {
        xmin: read_integer(bndbox, "xmin", &bndbox_path)?,
        ymin: read_integer(bndbox, "ymin", &bndbox_path)?,
        xmax: read_integer(bndbox, "xmax", &bndbox_path)?,
        ymax: read_integer(bndbox, "ymax", &bndbox_path)?,
    };
    Ok(pixel_box.normalize(size, label))
}

// Read `parent.key` as an integer, tolerating surrounding whitespace
fn read_integer<T: std::str::FromStr>(parent: &XmlValue, key: &str, parent_path: &str) -> Result<T> {
    let field = format!("{}.{}", parent_path, key);
    let text = parent
        .get(key)
        .and_then(XmlValue::as_text)
        .ok_or_else(|| ConvertError::MissingNode(field.clone()))?;
    text.trim()
        .parse()
        .map_err(|_| ConvertError::InvalidInteger {
            field,
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse;

    fn voc(body: &str) -> XmlValue {
        parse(&format!("<annotation>{}</annotation>", body)).unwrap()
    }

    const SIZE: &str = "<size><width>100</width><height>200</height><depth>3</depth></size>";
    const CAT: &str = "<object><name>cat</name><bndbox>\
        <xmin>10</xmin><ymin>20</ymin><xmax>60</xmax><ymax>120</ymax>\
        </bndbox></object>";
    const DOG: &str = "<object><name>dog</name><bndbox>\
        <xmin>0</xmin><ymin>0</ymin><xmax>100</xmax><ymax>100</ymax>\
        </bndbox></object>";

    #[test]
    fn test_extract_single_object() {
        let document = voc(&format!("<filename>a.jpg</filename>{}{}", SIZE, CAT));

        let extraction = extract(&document).unwrap();

        assert_eq!(
            extraction,
            Extraction::Ready {
                filename: "a.jpg".to_string(),
                size: ImageSize {
                    height: 200,
                    width: 100
                },
                boxes: vec![NormalizedBox {
                    x: 10.0,
                    y: 10.0,
                    width: 50.0,
                    height: 50.0,
                    label: "cat".to_string(),
                }],
            }
        );
    }

    #[test]
    fn test_single_object_matches_sequence_of_one() {
        let single = extract(&voc(&format!("<filename>a.jpg</filename>{}{}", SIZE, CAT))).unwrap();
        let mut many = match extract(&voc(&format!("<filename>a.jpg</filename>{}{}{}", SIZE, CAT, DOG))).unwrap() {
            Extraction::Ready { boxes, .. } => boxes,
            other => panic!("unexpected extraction: {:?}", other),
        };
        many.truncate(1);

        match single {
            Extraction::Ready { boxes, .. } => assert_eq!(boxes, many),
            other => panic!("unexpected extraction: {:?}", other),
        }
    }

    #[test]
    fn test_object_order_is_preserved() {
        let document = voc(&format!("<filename>a.jpg</filename>{}{}{}{}", SIZE, DOG, CAT, DOG));
        let labels: Vec<_> = match extract(&document).unwrap() {
            Extraction::Ready { boxes, .. } => boxes.into_iter().map(|b| b.label).collect(),
            other => panic!("unexpected extraction: {:?}", other),
        };
        assert_eq!(labels, vec!["dog", "cat", "dog"]);
    }

    #[test]
    fn test_missing_size_wins_over_objects() {
        let with_objects = voc(&format!("<filename>a.jpg</filename>{}", CAT));
        let without_objects = voc("<filename>a.jpg</filename>");
        let empty_size = voc(&format!("<filename>a.jpg</filename><size/>{}", CAT));

        for document in [with_objects, without_objects, empty_size] {
            assert_eq!(
                extract(&document).unwrap(),
                Extraction::MissingSize {
                    filename: Some("a.jpg".to_string())
                }
            );
        }
    }

    #[test]
    fn test_missing_boxes_keeps_size() {
        let document = voc(&format!("<filename>a.jpg</filename>{}<object/>", SIZE));
        assert_eq!(
            extract(&document).unwrap(),
            Extraction::MissingBoxes {
                filename: Some("a.jpg".to_string()),
                size: ImageSize {
                    height: 200,
                    width: 100
                },
            }
        );
    }

    #[test]
    fn test_missing_filename() {
        for document in [
            voc(&format!("{}{}", SIZE, CAT)),
            voc(&format!("<filename/>{}{}", SIZE, CAT)),
            voc(&format!("<filename>  </filename>{}{}", SIZE, CAT)),
        ] {
            match extract(&document).unwrap() {
                Extraction::MissingFilename { size, boxes } => {
                    assert_eq!(size.width, 100);
                    assert_eq!(boxes.len(), 1);
                    assert_eq!(boxes[0].label, "cat");
                }
                other => panic!("unexpected extraction: {:?}", other),
            }
        }

        assert_eq!(
            extract(&voc(SIZE)).unwrap(),
            Extraction::MissingBoxes {
                filename: None,
                size: ImageSize {
                    height: 200,
                    width: 100
                },
            }
        );
    }

    #[test]
    fn test_structural_errors() {
        let not_voc = parse("<labels><filename>a.jpg</filename></labels>").unwrap();
        assert!(matches!(extract(&not_voc), Err(ConvertError::MissingNode(node)) if node == "annotation"));

        let no_bndbox = voc(&format!("{}<object><name>cat</name></object>", SIZE));
        assert!(matches!(extract(&no_bndbox), Err(ConvertError::MissingNode(node)) if node == "object[0].bndbox"));

        let no_ymax = voc(&format!(
            "{}{}<object><name>cat</name><bndbox><xmin>1</xmin><ymin>1</ymin><xmax>2</xmax></bndbox></object>",
            SIZE, CAT
        ));
        assert!(matches!(extract(&no_ymax), Err(ConvertError::MissingNode(node)) if node == "object[1].bndbox.ymax"));
    }

    #[test]
    fn test_non_integer_fields() {
        let float_coordinate = voc(&format!(
            "{}<object><name>cat</name><bndbox><xmin>1.5</xmin><ymin>1</ymin><xmax>2</xmax><ymax>2</ymax></bndbox></object>",
            SIZE
        ));
        assert!(matches!(
            extract(&float_coordinate),
            Err(ConvertError::InvalidInteger { field, value }) if field == "object[0].bndbox.xmin" && value == "1.5"
        ));

        let bad_size = voc(&format!("<size><width>wide</width><height>2</height></size>{}", CAT));
        assert!(matches!(extract(&bad_size), Err(ConvertError::InvalidInteger { .. })));
    }

    #[test]
    fn test_full_range_coordinates() {
        let document = voc(&format!(
            "<filename>a.jpg</filename>{}<object><name>cat</name><bndbox>\
             <xmin>-9223372036854775808</xmin><ymin>0</ymin>\
             <xmax>9223372036854775807</xmax><ymax>200</ymax></bndbox></object>",
            SIZE
        ));

        match extract(&document).unwrap() {
            Extraction::Ready { boxes, .. } => {
                assert!(boxes[0].width.is_finite() && boxes[0].width > 0.0);
                assert_eq!(boxes[0].height, 100.0);
            }
            other => panic!("unexpected extraction: {:?}", other),
        }
    }

    #[test]
    fn test_zero_dimension_with_boxes() {
        let document = voc(&format!("<size><width>0</width><height>200</height></size>{}", CAT));
        assert!(matches!(extract(&document), Err(ConvertError::ZeroDimension { .. })));
    }
}
