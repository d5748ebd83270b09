#[cfg(test)]
mod tests {
    use crate::config::Granularity;
    use crate::engine::{ForwardPass, StepEngine, StepRecord};
    use crate::error::NeuraStepError;
    use crate::nn::Activation;
    use crate::test_utils::{relu_linear_network, seeded_network};
    use approx::assert_relative_eq;

    #[test]
    fn test_coarse_forward_steps() -> Result<(), NeuraStepError> {
        let mut net = relu_linear_network()?;
        let mut pass = ForwardPass::new(&net, vec![1.0, 2.0], Granularity::Coarse)?;
        let steps = pass.drain(&mut net)?;

        let kinds: Vec<&str> = steps.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec!["input", "layer_activation", "layer_activation", "forward_complete"]
        );
        match &steps[1] {
            StepRecord::LayerActivation {
                layer,
                z,
                a,
                activation,
                ..
            } => {
                assert_eq!(*layer, 0);
                assert_eq!(*activation, Activation::Relu);
                assert_relative_eq!(z[0], 0.7, epsilon = 1e-12);
                assert_relative_eq!(z[1], 1.0, epsilon = 1e-12);
                assert_eq!(z, a);
            }
            other => panic!("unexpected step {:?}", other),
        }
        match &steps[3] {
            StepRecord::ForwardComplete { output } => assert_relative_eq!(output[0], 0.95, epsilon = 1e-12),
            other => panic!("unexpected step {:?}", other),
        }

        assert_eq!(net.a_cache().len(), net.layer_count() + 1);
        assert_eq!(net.z_cache().len(), net.layer_count());
        assert!(net.forward_complete());
        assert!(pass.is_finished());
        assert_eq!(pass.advance(&mut net)?, None);
        Ok(())
    }

    #[test]
    fn test_detailed_forward_order() -> Result<(), NeuraStepError> {
        let mut net = relu_linear_network()?;
        let steps = ForwardPass::new(&net, vec![1.0, 2.0], Granularity::Detailed)?.drain(&mut net)?;
        // input + layer0 (2 neurons × (2 weights + bias) + activation)
        //       + layer1 (1 neuron × (2 weights + bias) + activation) + complete
        assert_eq!(steps.len(), 1 + 7 + 4 + 1);

        let order: Vec<(usize, usize, usize)> = steps
            .iter()
            .filter_map(|s| match s {
                StepRecord::WeightMultiplication {
                    layer,
                    neuron,
                    prev_neuron,
                    ..
                } => Some((*layer, *neuron, *prev_neuron)),
                _ => None,
            })
            .collect();
        assert_eq!(
            order,
            vec![(0, 0, 0), (0, 0, 1), (0, 1, 0), (0, 1, 1), (1, 0, 0), (1, 0, 1)]
        );

        match &steps[2] {
            StepRecord::WeightMultiplication {
                weight,
                prev_activation,
                product,
                running_sum,
                ..
            } => {
                assert_eq!(*weight, 0.3);
                assert_eq!(*prev_activation, 2.0);
                assert_relative_eq!(*product, 0.6, epsilon = 1e-12);
                assert_relative_eq!(*running_sum, 0.7, epsilon = 1e-12);
            }
            other => panic!("unexpected step {:?}", other),
        }
        match &steps[3] {
            StepRecord::BiasAddition {
                neuron, z_unbiased, z, ..
            } => {
                assert_eq!(*neuron, 0);
                assert_eq!(z_unbiased, z);
            }
            other => panic!("unexpected step {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_coarse_and_detailed_agree_bitwise() -> Result<(), NeuraStepError> {
        let base = seeded_network(3, &[(4, Activation::Tanh), (3, Activation::Softmax)], 9)?;
        let input = vec![0.3, -1.2, 2.5];

        let mut coarse = base.clone();
        ForwardPass::new(&coarse, input.clone(), Granularity::Coarse)?.drain(&mut coarse)?;
        let mut detailed = base.clone();
        ForwardPass::new(&detailed, input.clone(), Granularity::Detailed)?.drain(&mut detailed)?;

        assert_eq!(coarse.z_cache(), detailed.z_cache());
        assert_eq!(coarse.a_cache(), detailed.a_cache());
        assert_eq!(coarse.output(), Some(base.predict(&input)?.as_slice()));
        Ok(())
    }

    #[test]
    fn test_forward_is_deterministic() -> Result<(), NeuraStepError> {
        let base = seeded_network(2, &[(5, Activation::Sigmoid), (2, Activation::Linear)], 3)?;
        let mut first = base.clone();
        let mut second = base;
        ForwardPass::new(&first, vec![0.5, 0.25], Granularity::Coarse)?.drain(&mut first)?;
        ForwardPass::new(&second, vec![0.5, 0.25], Granularity::Coarse)?.drain(&mut second)?;
        assert_eq!(first.output(), second.output());
        Ok(())
    }

    #[test]
    fn test_new_pass_discards_previous_caches() -> Result<(), NeuraStepError> {
        let mut net = relu_linear_network()?;
        ForwardPass::new(&net, vec![1.0, 2.0], Granularity::Coarse)?.drain(&mut net)?;
        let mut pass = ForwardPass::new(&net, vec![3.0, 4.0], Granularity::Coarse)?;
        pass.advance(&mut net)?; // input
        pass.advance(&mut net)?; // layer 0
        assert_eq!(net.a_cache().len(), 2);
        assert_eq!(net.z_cache().len(), 1);
        assert_eq!(net.a_cache()[0], vec![3.0, 4.0]);
        assert!(!net.forward_complete());
        Ok(())
    }

    #[test]
    fn test_rejects_bad_input_before_any_step() -> Result<(), NeuraStepError> {
        let net = relu_linear_network()?;
        let err = ForwardPass::new(&net, vec![1.0, 2.0, 3.0], Granularity::Coarse).unwrap_err();
        assert_eq!(err, NeuraStepError::dimension("forward pass input", 2, 3));
        assert!(net.a_cache().is_empty());
        Ok(())
    }

    #[test]
    fn test_stepper_iterator() -> Result<(), NeuraStepError> {
        let mut net = relu_linear_network()?;
        let pass = ForwardPass::new(&net, vec![1.0, 2.0], Granularity::Coarse)?;
        let steps: Result<Vec<StepRecord>, NeuraStepError> = pass.steps(&mut net).collect();
        assert_eq!(steps?.len(), 4);
        assert!(net.forward_complete());
        Ok(())
    }

    #[test]
    fn test_interleaved_pass_is_misuse() -> Result<(), NeuraStepError> {
        let mut net = relu_linear_network()?;
        let mut first = ForwardPass::new(&net, vec![1.0, 2.0], Granularity::Detailed)?;
        // input, then the first weight multiplication of layer 0
        first.advance(&mut net)?;
        first.advance(&mut net)?;

        ForwardPass::new(&net, vec![0.0, 1.0], Granularity::Coarse)?.drain(&mut net)?;
        let completed = net.clone();

        let result = first.advance(&mut net);
        assert!(matches!(result, Err(NeuraStepError::SequenceMisuse(_))), "got {:?}", result);
        assert!(first.is_finished());
        // the other pass's caches are left as they were
        assert_eq!(net, completed);
        Ok(())
    }
}
