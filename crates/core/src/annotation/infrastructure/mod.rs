pub mod opencv_annotator;
