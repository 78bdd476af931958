use log::debug;

use crate::PipelineConfig;

macro_rules! passes {
    ([ $( $name:ident => $class:ident, )* ]) => {
        $( mod $name; )*
        $( pub use self::$name::*; )*

        #[derive(Debug)]
        pub struct PipelinePasses {
            $( pub $name: $class, )*
        }

        impl PipelinePasses {
            pub fn new(config: &PipelineConfig) -> Self {
                debug!("Initializing pipeline passes");

                Self {
                    $( $name: $class::new(config), )*
                }
            }
        }
    };
}

passes!([
    frame_accumulation => FrameAccumulationPass,
    frame_reprojection => FrameReprojectionPass,
    frame_variance => FrameVariancePass,
    frame_wavelet => FrameWaveletPass,
]);
