use crate::types::{
    AnnotationDocument, AnnotationGroup, ImageData, ImageSize, NormalizedBox, RectangleValue,
    ResultRecord, FROM_NAME, ORIGIN, RESULT_TYPE, TO_NAME,
};

/// Build the Label Studio task document for one image.
///
/// Boxes keep their order and get ids `box_1..box_N`, which are only unique
/// within this document.
pub fn build_annotation(
    filename: &str,
    size: ImageSize,
    boxes: &[NormalizedBox],
) -> AnnotationDocument {
    let result = boxes
        .iter()
        .enumerate()
        .map(|(index, normalized)| build_result(index, size, normalized))
        .collect();

    AnnotationDocument {
        data: ImageData {
            image: filename.to_string(),
        },
        annotations: vec![AnnotationGroup { result }],
        predictions: Vec::new(),
    }
}

fn build_result(index: usize, size: ImageSize, normalized: &NormalizedBox) -> ResultRecord {
    ResultRecord {
        original_width: size.width,
        original_height: size.height,
        image_rotation: 0,
        value: RectangleValue {
            x: normalized.x,
            y: normalized.y,
            width: normalized.width,
            height: normalized.height,
            rotation: 0,
            rectanglelabels: vec![normalized.label.clone()],
        },
        id: format!("box_{}", index + 1),
        from_name: FROM_NAME.to_string(),
        to_name: TO_NAME.to_string(),
        result_type: RESULT_TYPE.to_string(),
        origin: ORIGIN.to_string(),
    }
}
